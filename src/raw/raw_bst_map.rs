use alloc::vec::Vec;

use log::{debug, trace, warn};

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Node, Side};
use crate::compare::Compare;

/// The core binary search tree backing `BstMap`.
pub(crate) struct RawBstMap<K, V, C> {
    /// Arena storing all tree nodes (keys and links).
    nodes: Arena<Node<K>>,
    /// Arena storing all values, one per node.
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Link,
    /// Ordering strategy, fixed for the lifetime of the tree.
    cmp: C,
}

/// Where a vacant key would be attached: under `(parent, side)`, or as the root.
pub(crate) type Attach = Option<(Handle, Side)>;

/// Result of descending the tree for a key.
pub(crate) enum SearchResult {
    /// A node with an equal key exists.
    Found(Handle),
    /// No equal key; a new leaf for it belongs here.
    Vacant(Attach),
}

impl<K, V, C> RawBstMap<K, V, C> {
    /// Creates a new, empty tree ordered by `cmp`.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` entries before reallocating.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Releases every node. The arenas are reset wholesale, so this terminates in
    /// O(n) regardless of the tree's shape.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
    }

    #[cfg(test)]
    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    pub(crate) const fn nodes(&self) -> &Arena<Node<K>> {
        &self.nodes
    }

    pub(crate) const fn values(&self) -> &Arena<V> {
        &self.values
    }

    /// Splits the borrow so links can be read while values are written.
    pub(crate) fn parts_mut(&mut self) -> (&Arena<Node<K>>, &mut Arena<V>) {
        (&self.nodes, &mut self.values)
    }

    /// Returns the key and value stored at a node.
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get(node.value()))
    }

    /// Returns the key and a mutable reference to the value stored at a node.
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Returns the first node in comparator order.
    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.nodes.leftmost(root))
    }

    /// Returns the last node in comparator order.
    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.nodes.rightmost(root))
    }

    pub(crate) fn successor(&self, handle: Handle) -> Link {
        self.nodes.successor(handle)
    }

    /// Removes every entry, returning them in comparator order. The in-order walk is
    /// computed first because taking nodes out of the arena breaks their links.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.nodes.successor(handle);
        }

        let mut result = Vec::with_capacity(order.len());
        for handle in order {
            let (key, value_handle) = self.nodes.take(handle).into_payload();
            result.push((key, self.values.take(value_handle)));
        }

        self.clear();
        result
    }

    /// Attaches a new leaf at `at`, returning its handle.
    pub(crate) fn attach(&mut self, at: Attach, key: K, value: V) -> Handle {
        let value = self.values.alloc(value);
        let parent = at.map(|(p, _)| p);
        let handle = self.nodes.alloc(Node::new(key, value, parent));
        match at {
            Some((p, side)) => {
                let parent_node = self.nodes.get_mut(p);
                debug_assert!(parent_node.child(side).is_none(), "attaching over an occupied link");
                parent_node.set_child(side, Some(handle));
            }
            None => {
                debug_assert!(self.root.is_none(), "attaching a second root");
                self.root = Some(handle);
            }
        }
        handle
    }

    /// Removes the node at `handle`, returning its key and value.
    ///
    /// A node with two children is never spliced directly: its in-order successor
    /// (which has no left child) is detached instead and its payload moved into this
    /// node's slot, so all relinking happens in the leaf and one-child cases.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        let (key, value) = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.nodes.leftmost(right);
                trace!("erase: two children, relocating in-order successor");
                let (successor_key, successor_value) = self.unlink(successor);
                self.nodes.get_mut(handle).replace_payload(successor_key, successor_value)
            }
            _ if node.is_leaf() => {
                trace!("erase: leaf");
                self.unlink(handle)
            }
            _ => {
                trace!("erase: one child");
                self.unlink(handle)
            }
        };
        (key, self.values.take(value))
    }

    /// Splices out a node with at most one child: the child (if any) takes the node's
    /// place under the node's parent, or becomes the root. Frees the node slot and
    /// returns its payload; the value slot is left to the caller.
    fn unlink(&mut self, handle: Handle) -> (K, Handle) {
        let node = self.nodes.get(handle);
        assert!(
            node.left().is_none() || node.right().is_none(),
            "`RawBstMap::unlink()` - node has two children!"
        );
        let child = node.left().or(node.right());
        let parent = node.parent();

        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        self.replace_link(parent, handle, child);

        self.nodes.take(handle).into_payload()
    }

    /// Repoints whichever link of `parent` (or the root) names `old` at `new`.
    fn replace_link(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                let side = parent_node
                    .side_of(old)
                    .expect("`RawBstMap::replace_link()` - parent does not link to child!");
                parent_node.set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Returns the height of the tree (0 when empty) and whether the heights of every
    /// node's two subtrees differ by at most one.
    ///
    /// Iterative post-order walk, so degenerate trees cannot exhaust the stack.
    pub(crate) fn height_and_balance(&self) -> (usize, bool) {
        let Some(root) = self.root else {
            return (0, true);
        };

        let mut balanced = true;
        // (node, children already visited)
        let mut stack: Vec<(Handle, bool)> = alloc::vec![(root, false)];
        // Heights of finished subtrees, in completion order.
        let mut heights: Vec<usize> = Vec::new();

        while let Some((handle, expanded)) = stack.pop() {
            let node = self.nodes.get(handle);
            if expanded {
                let right = if node.right().is_some() { heights.pop().unwrap_or_default() } else { 0 };
                let left = if node.left().is_some() { heights.pop().unwrap_or_default() } else { 0 };
                balanced &= left.abs_diff(right) <= 1;
                heights.push(1 + left.max(right));
            } else {
                stack.push((handle, true));
                // Right first so the left subtree finishes first and sits below it.
                if let Some(right) = node.right() {
                    stack.push((right, false));
                }
                if let Some(left) = node.left() {
                    stack.push((left, false));
                }
            }
        }

        (heights.pop().unwrap_or_default(), balanced)
    }
}

impl<K, V, C: Compare<K>> RawBstMap<K, V, C> {
    /// Descends from the root with three-way comparisons.
    pub(crate) fn search(&self, key: &K) -> SearchResult {
        let mut at: Attach = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = if self.cmp.less(key, node.key()) {
                Side::Left
            } else if self.cmp.less(node.key(), key) {
                Side::Right
            } else {
                return SearchResult::Found(handle);
            };
            at = Some((handle, side));
            current = node.child(side);
        }

        SearchResult::Vacant(at)
    }

    /// Returns the node holding a key equal to `key`, if any.
    pub(crate) fn find(&self, key: &K) -> Link {
        match self.search(key) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant(_) => None,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        let handle = self.find(key)?;
        Some(self.entry(handle).1)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.find(key)?;
        Some(self.entry_mut(handle).1)
    }

    /// Inserts a new leaf. Returns `None`, leaving the tree untouched, if an equal key
    /// is already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<Handle> {
        match self.search(&key) {
            SearchResult::Found(_) => None,
            SearchResult::Vacant(at) => Some(self.attach(at, key, value)),
        }
    }

    pub(crate) fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.find(key)?;
        Some(self.remove_at(handle))
    }

    /// Rebuilds the tree into a height-balanced shape and verifies the result.
    ///
    /// The entries are drained in order (already sorted), then reinserted middle
    /// first so every subtree's root splits its range evenly.
    pub(crate) fn rebalance(&mut self) -> bool {
        let mut entries: Vec<Option<(K, V)>> = self.drain_to_vec().into_iter().map(Some).collect();
        let len = entries.len();
        self.build_balanced(&mut entries);

        let (height, balanced) = self.height_and_balance();
        if balanced {
            debug!("rebuilt {len} entries into a balanced tree of height {height}");
        } else {
            warn!("rebuilt {len} entries but the tree of height {height} is not balanced");
        }
        debug_assert!(balanced, "`RawBstMap::rebalance()` - rebuilt tree is not balanced!");
        balanced
    }

    fn build_balanced(&mut self, entries: &mut [Option<(K, V)>]) {
        match entries.len() {
            0 => {}
            1 | 2 => {
                for entry in entries {
                    self.reinsert(entry);
                }
            }
            len => {
                // Lower middle for even lengths.
                let middle = if len % 2 == 0 { len / 2 - 1 } else { len / 2 };
                let (left, rest) = entries.split_at_mut(middle);
                let (pivot, right) = rest.split_at_mut(1);
                self.reinsert(&mut pivot[0]);
                self.build_balanced(left);
                self.build_balanced(right);
            }
        }
    }

    fn reinsert(&mut self, entry: &mut Option<(K, V)>) {
        if let Some((key, value)) = entry.take() {
            let inserted = self.insert(key, value);
            debug_assert!(inserted.is_some(), "drained keys must be unique");
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RawBstMap<K, V, C> {
    /// Deep copy preserving shape. Nodes are allocated densely in the new arenas and
    /// every parent link is re-derived from the copy, not carried over.
    fn clone(&self) -> Self {
        let mut nodes: Arena<Node<K>> = Arena::with_capacity(self.len());
        let mut values: Arena<V> = Arena::with_capacity(self.len());
        let mut root = None;

        // (source node, where its copy hangs in the new tree)
        let mut stack: Vec<(Handle, Attach)> = Vec::new();
        if let Some(source_root) = self.root {
            stack.push((source_root, None));
        }

        while let Some((source, at)) = stack.pop() {
            let source_node = self.nodes.get(source);
            let value = values.alloc(self.values.get(source_node.value()).clone());
            let parent = at.map(|(p, _)| p);
            let copy = nodes.alloc(Node::new(source_node.key().clone(), value, parent));
            match at {
                Some((p, side)) => nodes.get_mut(p).set_child(side, Some(copy)),
                None => root = Some(copy),
            }

            if let Some(right) = source_node.right() {
                stack.push((right, Some((copy, Side::Right))));
            }
            if let Some(left) = source_node.left() {
                stack.push((left, Some((copy, Side::Left))));
            }
        }

        Self {
            nodes,
            values,
            root,
            cmp: self.cmp.clone(),
        }
    }
}
