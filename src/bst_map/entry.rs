use core::fmt;
use core::mem;

use crate::compare::{Compare, Less};
use crate::position::Position;
use crate::raw::{Attach, Handle, RawBstMap};

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`crate::BstMap`].
///
/// # Examples
///
/// ```
/// use sugi_tree::BstMap;
/// use sugi_tree::bst_map::Entry;
///
/// let mut map = BstMap::new();
///
/// match map.entry("oz") {
///     Entry::Vacant(v) => {
///         v.insert(1);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 1;
///     }
/// }
/// assert_eq!(map[&"oz"], 1);
/// ```
///
/// [`entry`]: crate::BstMap::entry
pub enum Entry<'a, K: 'a, V: 'a, C = Less> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Entry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in a `BstMap`.
/// It is part of the [`Entry`] enum.
///
/// The search that produced it already found the leaf link the key belongs under, so
/// inserting through it does not descend the tree again.
pub struct VacantEntry<'a, K, V, C = Less> {
    pub(crate) key: K,
    pub(crate) at: Attach,
    pub(crate) tree: &'a mut RawBstMap<K, V, C>,
}

impl<K: fmt::Debug, V, C> fmt::Debug for VacantEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", &self.key).finish()
    }
}

/// A view into an occupied entry in a `BstMap`.
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use sugi_tree::BstMap;
/// use sugi_tree::bst_map::Entry;
///
/// let mut map = BstMap::new();
/// map.insert("oz", 1);
///
/// if let Entry::Occupied(mut o) = map.entry("oz") {
///     *o.get_mut() += 1;
/// }
/// assert_eq!(map[&"oz"], 2);
/// ```
pub struct OccupiedEntry<'a, K, V, C = Less> {
    pub(crate) handle: Handle,
    pub(crate) tree: &'a mut RawBstMap<K, V, C>,
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}

impl<'a, K, V, C: Compare<K>> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map[&"poneyland"], 12);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) either way; the search already happened in `entry`.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, String> = BstMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map[&"poneyland"], "hoho".to_string());
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of the default
    /// function, which receives a reference to the key moved into `.entry(key)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    ///
    /// map.entry("poneyland").or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map[&"poneyland"], 9);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(&v.key);
                v.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(o) => o.key(),
            Entry::Vacant(v) => v.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map[&"poneyland"], 42);
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map[&"poneyland"], 43);
    /// ```
    #[allow(clippy::return_self_not_must_use)]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(ref mut o) = self {
            f(o.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, String> = BstMap::new();
    /// let entry = map.entry("poneyland").insert_entry("hoho".to_string());
    ///
    /// assert_eq!(entry.key(), &"poneyland");
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K, V: Default, C: Compare<K>> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, Option<usize>> = BstMap::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map[&"poneyland"], None);
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("poneyland") {
    ///     assert_eq!(v.into_key(), "poneyland");
    /// }
    /// assert!(map.is_empty());
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, u32> = BstMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map[&"poneyland"], 37);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let tree = self.tree;
        let handle = tree.attach(self.at, self.key, value);
        tree.entry_mut(handle).1
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, u32> = BstMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     let entry = o.insert_entry(37);
    ///     assert_eq!(entry.get(), &37);
    /// }
    /// assert_eq!(map[&"poneyland"], 37);
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        let handle = self.tree.attach(self.at, self.key, value);
        OccupiedEntry { handle, tree: self.tree }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Gets a reference to the key stored in the map, which may differ from the probe
    /// key when the comparator treats distinct values as equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// map.entry("poneyland").or_insert(12);
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    #[must_use]
    pub fn key(&self) -> &K {
        self.tree.node(self.handle).key()
    }

    /// Returns the position of this entry, usable with
    /// [`BstMap::entry_at`](crate::BstMap::entry_at) once the entry is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// let pos = map.entry(3).insert_entry("c").position();
    /// assert_eq!(map.entry_at(pos), Some((&3, &"c")));
    /// assert_eq!(map.find(&3), pos);
    /// ```
    #[must_use]
    pub fn position(&self) -> Position {
        Position::at(self.handle)
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove_entry(), ("poneyland", 12));
    /// }
    /// assert!(!map.contains_key(&"poneyland"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) where h is the height of the tree, to locate a successor when the entry has
    /// two children.
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_at(self.handle)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.tree.entry(self.handle).1
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     *o.get_mut() += 10;
    ///     assert_eq!(*o.get(), 22);
    ///
    ///     // We can use the same Entry multiple times.
    ///     *o.get_mut() += 2;
    /// }
    /// assert_eq!(map[&"poneyland"], 24);
    /// ```
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.entry_mut(self.handle).1
    }

    /// Converts the entry into a mutable reference to its value, bound to the
    /// lifetime of the map borrow.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.entry_mut(self.handle).1
    }

    /// Sets the value of the entry and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    /// use sugi_tree::bst_map::Entry;
    ///
    /// let mut map: BstMap<&str, usize> = BstMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("poneyland") {
    ///     assert_eq!(o.insert(15), 12);
    /// }
    /// assert_eq!(map[&"poneyland"], 15);
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::BstMap;
    use crate::bst_map::Entry;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn vacant_insert_attaches_where_search_ended() {
        let mut map = BstMap::new();
        for k in [50, 30, 70, 20, 40] {
            map.insert(k, ());
        }
        match map.entry(35) {
            Entry::Vacant(v) => {
                v.insert(());
            }
            Entry::Occupied(_) => panic!("35 is absent"),
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [20, 30, 35, 40, 50, 70]);
        map.raw.validate_invariants();
    }

    #[test]
    fn vacant_entry_into_root_of_empty_map() {
        let mut map: BstMap<i32, &str> = BstMap::new();
        *map.entry(1).or_insert("a") = "b";
        assert_eq!(map.get(&1), Some(&"b"));
        assert_eq!(map.begin(), map.find(&1));
        map.raw.validate_invariants();
    }

    #[test]
    fn occupied_remove_with_two_children() {
        let mut map = BstMap::new();
        for k in [8, 3, 10, 1, 6, 14] {
            map.insert(k, k * 100);
        }
        if let Entry::Occupied(o) = map.entry(3) {
            assert_eq!(o.remove_entry(), (3, 300));
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [1, 6, 8, 10, 14]);
        map.raw.validate_invariants();
    }

    #[test]
    fn occupied_insert_keeps_stored_key() {
        let mut map: BstMap<String, u32> = BstMap::new();
        map.insert(String::from("k"), 1);
        let mut entry = map.entry(String::from("k")).insert_entry(2);
        assert_eq!(entry.insert(3), 2);
        assert_eq!(entry.remove(), 3);
        assert!(map.is_empty());
    }

    #[test]
    fn debug_output() {
        let mut map = BstMap::new();
        map.insert(1, "a");
        assert_eq!(alloc::format!("{:?}", map.entry(1)), r#"Entry(OccupiedEntry { key: 1, value: "a" })"#);
        assert_eq!(alloc::format!("{:?}", map.entry(2)), "Entry(VacantEntry { key: 2 })");
    }
}
