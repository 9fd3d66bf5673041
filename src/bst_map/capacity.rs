use super::BstMap;
use crate::compare::Less;
use crate::raw::RawBstMap;

impl<K, V> BstMap<K, V, Less> {
    /// Creates an empty map with capacity for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BstMap::with_capacity_and_comparator(capacity, Less)
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Creates an empty map ordered by `cmp` with capacity for at least `capacity`
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Greater};
    ///
    /// let mut map = BstMap::with_capacity_and_comparator(8, Greater);
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, 1]);
    /// ```
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        BstMap {
            raw: RawBstMap::with_capacity(capacity, cmp),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the capacity grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::BstMap;

    #[test]
    fn erased_slots_are_reused() {
        let mut map = BstMap::with_capacity(4);
        let capacity = map.capacity();
        for round in 0..10 {
            for k in 0..4 {
                map.insert(k, round);
            }
            for k in 0..4 {
                map.erase(&k).unwrap();
            }
        }
        assert_eq!(map.capacity(), capacity);
    }
}
