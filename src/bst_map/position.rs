use super::BstMap;
use crate::compare::Compare;
use crate::position::Position;

impl<K, V, C> BstMap<K, V, C> {
    /// Returns the position of the first entry in comparator order, or
    /// [`end`](BstMap::end) if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.begin(), map.end());
    ///
    /// map.insert(5, "e");
    /// map.insert(2, "b");
    /// assert_eq!(map.entry_at(map.begin()), Some((&2, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) where h is the height of the tree.
    #[must_use]
    pub fn begin(&self) -> Position {
        Position(self.raw.first())
    }

    /// Returns the end sentinel, one past the last entry.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::END
    }

    /// Returns the position following `pos` in comparator order. Advancing the last
    /// entry yields [`end`](BstMap::end); advancing `end` stays at `end`.
    ///
    /// The successor is found through parent links: the leftmost node of the right
    /// subtree if there is one, otherwise the nearest ancestor reached from its left
    /// child.
    ///
    /// # Panics
    ///
    /// May panic if `pos` names an entry that has since been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map = BstMap::from([(1, 'a'), (2, 'b')]);
    /// let second = map.next_position(map.begin());
    /// assert_eq!(map.entry_at(second), Some((&2, &'b')));
    /// assert!(map.next_position(second).is_end());
    /// assert!(map.next_position(map.end()).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) worst case, amortized O(1) over a full traversal.
    #[must_use]
    pub fn next_position(&self, pos: Position) -> Position {
        Position(pos.0.and_then(|handle| self.raw.successor(handle)))
    }

    /// Returns the key and value at `pos`, or `None` for the end sentinel.
    ///
    /// # Panics
    ///
    /// May panic if `pos` names an entry that has since been removed.
    #[must_use]
    pub fn entry_at(&self, pos: Position) -> Option<(&K, &V)> {
        pos.0.map(|handle| self.raw.entry(handle))
    }

    /// Returns the key and a mutable reference to the value at `pos`, or `None` for the
    /// end sentinel.
    ///
    /// # Panics
    ///
    /// May panic if `pos` names an entry that has since been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// let (pos, _) = map.insert("x", 1);
    /// if let Some((_, value)) = map.value_at_mut(pos) {
    ///     *value = 2;
    /// }
    /// assert_eq!(map[&"x"], 2);
    /// ```
    pub fn value_at_mut(&mut self, pos: Position) -> Option<(&K, &mut V)> {
        pos.0.map(|handle| self.raw.entry_mut(handle))
    }
}

impl<K, V, C: Compare<K>> BstMap<K, V, C> {
    /// Returns the position of the entry whose key compares equal to `key`, or
    /// [`end`](BstMap::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map = BstMap::from([(8, "eight"), (3, "three")]);
    /// assert_eq!(map.entry_at(map.find(&3)), Some((&3, &"three")));
    /// assert_eq!(map.find(&4), map.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) where h is the height of the tree.
    pub fn find(&self, key: &K) -> Position {
        Position(self.raw.find(key))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{BstMap, Position};
    use alloc::vec::Vec;

    fn walk<K: Copy, V>(map: &BstMap<K, V>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut pos = map.begin();
        while pos != map.end() {
            keys.push(*map.entry_at(pos).unwrap().0);
            pos = map.next_position(pos);
        }
        keys
    }

    #[test]
    fn cursor_walk_matches_iter() {
        let mut map = BstMap::new();
        for k in [8, 3, 6, 1, 10, 7, 14, 4, 13] {
            map.insert(k, ());
        }
        assert_eq!(walk(&map), [1, 3, 4, 6, 7, 8, 10, 13, 14]);
        assert_eq!(walk(&map), map.keys().copied().collect::<Vec<_>>());
    }

    #[test]
    fn empty_map_begins_at_end() {
        let map: BstMap<u8, u8> = BstMap::new();
        assert_eq!(map.begin(), map.end());
        assert_eq!(map.begin(), Position::END);
        assert_eq!(map.entry_at(map.begin()), None);
    }

    #[test]
    fn insert_position_is_findable() {
        let mut map = BstMap::new();
        let (a, _) = map.insert(2, 'b');
        let (b, _) = map.insert(1, 'a');
        assert_eq!(map.find(&2), a);
        assert_eq!(map.find(&1), b);
        assert_eq!(map.begin(), b);
        assert_eq!(map.next_position(b), a);
        assert!(map.next_position(a).is_end());
    }

    #[test]
    fn positions_survive_other_inserts() {
        let mut map = BstMap::new();
        let (pos, _) = map.insert(10, "ten");
        for k in 0..20 {
            map.insert(k, "other");
        }
        assert_eq!(map.entry_at(pos), Some((&10, &"ten")));
    }

    #[test]
    fn value_at_end_is_none() {
        let mut map: BstMap<u8, u8> = BstMap::new();
        let end = map.end();
        assert!(map.value_at_mut(end).is_none());
    }
}
