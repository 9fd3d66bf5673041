use super::BstMap;
use crate::compare::Compare;

impl<K, V, C> BstMap<K, V, C> {
    /// Returns the height of the tree: the number of nodes on the longest path from the
    /// root to a leaf. An empty map has height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.height(), 0);
    /// for k in 0..4 {
    ///     map.insert(k, ());
    /// }
    /// // Ascending inserts form a chain.
    /// assert_eq!(map.height(), 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height_and_balance().0
    }

    /// Returns `true` if, at every node, the heights of the two subtrees differ by at
    /// most one. An empty map is balanced.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.raw.height_and_balance().1
    }
}

impl<K, V, C: Compare<K>> BstMap<K, V, C> {
    /// Rebuilds the tree into a height-balanced shape.
    ///
    /// The entries keep their keys, values and order; only the shape changes. Each
    /// subtree is rooted at the middle entry of its range (the lower middle for even
    /// lengths), so the result has height ⌈log2(n + 1)⌉. All previously obtained
    /// positions are invalidated.
    ///
    /// Returns `true` when the rebuilt tree passes the balance check, which it always
    /// should.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<u32, ()> = (0..1000).map(|k| (k, ())).collect();
    /// assert_eq!(map.height(), 1000);
    /// assert!(!map.is_balanced());
    ///
    /// assert!(map.balance());
    /// assert_eq!(map.height(), 10);
    /// assert_eq!(map.len(), 1000);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n log n)
    #[allow(clippy::must_use_candidate)]
    pub fn balance(&mut self) -> bool {
        self.raw.rebalance()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::BstMap;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn ceil_log2_plus_one(n: usize) -> usize {
        (usize::BITS - n.leading_zeros()) as usize
    }

    #[test]
    fn empty_map_balances_trivially() {
        let mut map: BstMap<i32, i32> = BstMap::new();
        assert!(map.balance());
        assert!(map.is_empty());
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn balance_keeps_entries() {
        let mut map = BstMap::new();
        for k in [8, 3, 6, 1, 10, 7, 14, 4, 13] {
            map.insert(k, k * 2);
        }
        let before: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        map.balance();
        let after: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(before, after);
        assert_eq!(map.height(), 4);
        map.raw.validate_invariants();
    }

    proptest! {
        #[test]
        fn balanced_height_is_minimal(keys in proptest::collection::btree_set(any::<i16>(), 0..300)) {
            let mut map: BstMap<i16, ()> = keys.iter().map(|&k| (k, ())).collect();
            prop_assert!(map.balance());
            prop_assert!(map.is_balanced());
            prop_assert_eq!(map.height(), ceil_log2_plus_one(keys.len()));
            map.raw.validate_invariants();
        }
    }
}
