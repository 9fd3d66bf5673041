use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::Node;

// Read-only navigation over the node arena. These never touch ownership, so iterators
// can use them while values are borrowed mutably from the separate value arena.
impl<K> Arena<Node<K>> {
    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the in-order successor of `handle`, or `None` if it is the last node.
    ///
    /// With a right child the successor is the leftmost node of the right subtree.
    /// Otherwise climb while the current node is its parent's right child; the first
    /// parent reached from a left child is the successor.
    pub(crate) fn successor(&self, handle: Handle) -> Link {
        let node = self.get(handle);
        if let Some(right) = node.right() {
            return Some(self.leftmost(right));
        }

        let mut current = handle;
        let mut parent = node.parent();
        while let Some(p) = parent {
            let parent_node = self.get(p);
            if parent_node.left() == Some(current) {
                return Some(p);
            }
            current = p;
            parent = parent_node.parent();
        }
        None
    }
}
