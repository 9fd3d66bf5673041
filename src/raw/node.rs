use super::handle::{Handle, Link};

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A single tree vertex.
///
/// `left` and `right` are owning in the sense that every node is reachable from exactly
/// one link; `parent` is a back-reference used only for navigation.
pub(crate) struct Node<K> {
    key: K,
    // The value lives in a separate arena so `IterMut` can hand out `&mut V` while
    // still reading links from this arena.
    value: Handle,
    left: Link,
    right: Link,
    parent: Link,
}

impl<K> Node<K> {
    /// Creates a detached leaf holding `key` and the value at `value`.
    pub(crate) const fn new(key: K, value: Handle, parent: Link) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> Handle {
        self.value
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    /// Returns the side on which `child` hangs from this node, or `None` if it is not a
    /// child at all.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Replaces the key and value handle, returning the previous pair. Used only when the
    /// erase path moves the in-order successor's payload into this slot.
    pub(crate) fn replace_payload(&mut self, key: K, value: Handle) -> (K, Handle) {
        let old_key = core::mem::replace(&mut self.key, key);
        let old_value = core::mem::replace(&mut self.value, value);
        (old_key, old_value)
    }

    /// Consumes the node, returning its key and value handle.
    pub(crate) fn into_payload(self) -> (K, Handle) {
        (self.key, self.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new("k", Handle::from_index(3), None);
        assert!(node.is_leaf());
        assert_eq!(node.parent(), None);
        assert_eq!(node.value(), Handle::from_index(3));
        assert_eq!(*node.key(), "k");
    }

    #[test]
    fn children_are_addressed_by_side() {
        let mut node = Node::new(0, Handle::from_index(0), Some(Handle::from_index(9)));
        let l = Handle::from_index(1);
        let r = Handle::from_index(2);

        node.set_child(Side::Left, Some(l));
        node.set_child(Side::Right, Some(r));

        assert_eq!(node.left(), Some(l));
        assert_eq!(node.child(Side::Right), Some(r));
        assert_eq!(node.side_of(l), Some(Side::Left));
        assert_eq!(node.side_of(r), Some(Side::Right));
        assert_eq!(node.side_of(Handle::from_index(5)), None);
        assert!(!node.is_leaf());

        node.set_child(Side::Left, None);
        assert_eq!(node.side_of(l), None);
    }

    #[test]
    fn payload_replacement_keeps_links() {
        let mut node = Node::new(10, Handle::from_index(0), None);
        node.set_child(Side::Right, Some(Handle::from_index(4)));

        let (old_key, old_value) = node.replace_payload(12, Handle::from_index(7));
        assert_eq!((old_key, old_value), (10, Handle::from_index(0)));
        assert_eq!(*node.key(), 12);
        assert_eq!(node.right(), Some(Handle::from_index(4)));
        assert_eq!(node.into_payload(), (12, Handle::from_index(7)));
    }
}
