use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;

use crate::compare::{Compare, Less};
use crate::error::{Error, Result};
use crate::position::Position;
use crate::raw::{Arena, Link, Node, RawBstMap, SearchResult};

mod balance;
mod capacity;
mod entry;
mod position;

pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map based on a binary search tree with parent links.
///
/// Entries are kept in the order defined by the map's comparator `C`, a [`Compare`]
/// strategy fixed at construction ([`Less`] unless stated otherwise). Keys are unique
/// under that comparator: inserting a key that compares equal to an existing one is
/// rejected and leaves the map unchanged.
///
/// The tree is *not* self-balancing. Its shape follows the insertion order, so sorted
/// input produces a chain. Call [`balance`](BstMap::balance) to rebuild it into a
/// height-balanced shape when lookups matter more than inserts.
///
/// Iteration is forward only, in comparator order, following each node's in-order
/// successor through the parent links.
///
/// # Examples
///
/// ```
/// use sugi_tree::BstMap;
///
/// let mut map = BstMap::new();
/// for key in [8, 3, 6, 1, 10, 7, 14, 4, 13] {
///     map.insert(key, key * 10);
/// }
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [1, 3, 4, 6, 7, 8, 10, 13, 14]);
///
/// // Duplicate keys are rejected.
/// let (pos, inserted) = map.insert(6, 0);
/// assert!(!inserted);
/// assert!(pos.is_end());
/// assert_eq!(map[&6], 60);
///
/// map.erase(&8).unwrap();
/// assert!(map.find(&8).is_end());
///
/// map.balance();
/// assert!(map.is_balanced());
/// ```
///
/// A map with a known list of items can be initialized from an array:
///
/// ```
/// use sugi_tree::BstMap;
///
/// let solar_distance = BstMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.first_key_value(), Some((&"Earth", &1.0)));
/// ```
pub struct BstMap<K, V, C = Less> {
    raw: RawBstMap<K, V, C>,
}

/// An iterator over the entries of a `BstMap`, in comparator order.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`].
///
/// # Examples
///
/// ```
/// use sugi_tree::BstMap;
///
/// let map = BstMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K>>,
    values: &'a Arena<V>,
    front: Link,
    remaining: usize,
}

/// A mutable iterator over the entries of a `BstMap`, in comparator order.
///
/// This `struct` is created by the [`iter_mut`] method on [`BstMap`].
///
/// # Examples
///
/// ```
/// use sugi_tree::BstMap;
///
/// let mut map = BstMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: BstMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    nodes: &'a Arena<Node<K>>,
    values: *mut Arena<V>,
    front: Link,
    remaining: usize,
    _marker: PhantomData<&'a mut V>,
}

// SAFETY: IterMut behaves as (&Arena<Node<K>>, &mut Arena<V>), so it is Send when K is
// Sync and V is Send.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}

// SAFETY: Shared access to an IterMut only exposes `&K` and `&V` through its fields, so it
// is Sync when K and V are Sync.
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a `BstMap`, in comparator order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `BstMap`.
///
/// This `struct` is created by the [`keys`] method on [`BstMap`].
///
/// [`keys`]: BstMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `BstMap`.
///
/// This `struct` is created by the [`values`] method on [`BstMap`].
///
/// [`values`]: BstMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `BstMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`BstMap`].
///
/// [`values_mut`]: BstMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap` in ascending key order.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BstMap<K, V> {
        BstMap {
            raw: RawBstMap::new(Less),
        }
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Makes a new, empty `BstMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Greater};
    ///
    /// let mut map = BstMap::with_comparator(Greater);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.first_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> BstMap<K, V, C> {
        BstMap {
            raw: RawBstMap::new(cmp),
        }
    }

    /// Returns the map's ordering strategy.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Clears the map, removing all elements.
    ///
    /// Runs in O(n) for any shape of tree, including a fully degenerate chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Moves the contents out of the map, leaving it empty and usable with the same
    /// ordering strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut source = BstMap::from([(1, "a"), (2, "b")]);
    /// let destination = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(destination.len(), 2);
    ///
    /// source.insert(3, "c");
    /// assert_eq!(source.len(), 1);
    /// ```
    #[must_use = "use `clear` to drop the contents"]
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        let empty = RawBstMap::new(self.raw.comparator().clone());
        BstMap {
            raw: core::mem::replace(&mut self.raw, empty),
        }
    }

    /// Gets an iterator over the entries of the map, in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.raw.nodes(),
            values: self.raw.values(),
            front: self.raw.first(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map[&"c"], 13);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let front = self.raw.first();
        let remaining = self.raw.len();
        let (nodes, values) = self.raw.parts_mut();
        IterMut {
            nodes,
            values: values as *mut Arena<V>,
            front,
            remaining,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in comparator order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map = BstMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in comparator order of their
    /// keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
    /// for value in map.values_mut() {
    ///     value.push_str("!");
    /// }
    /// assert_eq!(map[&1], "hello!");
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the first key-value pair in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|handle| self.raw.entry(handle))
    }

    /// Returns the last key-value pair in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|handle| self.raw.entry(handle))
    }
}

impl<K, V, C: Compare<K>> BstMap<K, V, C> {
    /// Makes a map ordered by `cmp` that starts with a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Less};
    ///
    /// let map = BstMap::with_entry(8, "eight", Less);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map[&8], "eight");
    /// ```
    #[must_use]
    pub fn with_entry(key: K, value: V, cmp: C) -> Self {
        let mut map = BstMap::with_comparator(cmp);
        map.insert(key, value);
        map
    }

    /// Builds a map ordered by `cmp` from an iterator of pairs. Later duplicates of a key
    /// are rejected, so the first occurrence wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Greater};
    ///
    /// let map = BstMap::from_iter_with_comparator([(1, 'a'), (2, 'b'), (1, 'z')], Greater);
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&2, &'b'), (&1, &'a')]);
    /// ```
    pub fn from_iter_with_comparator<I: IntoIterator<Item = (K, V)>>(iter: I, cmp: C) -> Self {
        let mut map = BstMap::with_comparator(cmp);
        map.extend(iter);
        map
    }

    /// Inserts a key-value pair, moving both into the map.
    ///
    /// Returns the position of the new entry and `true`. If an entry with an equal key
    /// already exists the map is left unchanged, the pair is dropped, and the result is
    /// the end sentinel with `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// let (pos, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(map.entry_at(pos), Some((&37, &"a")));
    ///
    /// let (pos, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert!(pos.is_end());
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        match self.raw.insert(key, value) {
            Some(handle) => (Position::at(handle), true),
            None => (Position::END, false),
        }
    }

    /// Inserts a copy of `pair`, leaving the caller's pair untouched.
    ///
    /// Same outcome as [`insert`](BstMap::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let pair = (String::from("k"), vec![1, 2, 3]);
    /// let mut map = BstMap::new();
    /// assert!(map.insert_cloned(&pair).1);
    /// assert_eq!(map[&pair.0], pair.1);
    /// ```
    pub fn insert_cloned(&mut self, pair: &(K, V)) -> (Position, bool)
    where
        K: Clone,
        V: Clone,
    {
        // Probe first so a rejected pair is never cloned.
        match self.raw.search(&pair.0) {
            SearchResult::Found(_) => (Position::END, false),
            SearchResult::Vacant(at) => {
                let handle = self.raw.attach(at, pair.0.clone(), pair.1.clone());
                (Position::at(handle), true)
            }
        }
    }

    /// Builds a pair from anything convertible into `(K, V)` and inserts it.
    ///
    /// Same outcome as [`insert`](BstMap::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// struct Reading {
    ///     sensor: u32,
    ///     celsius: f32,
    /// }
    ///
    /// impl From<Reading> for (u32, f32) {
    ///     fn from(r: Reading) -> Self {
    ///         (r.sensor, r.celsius)
    ///     }
    /// }
    ///
    /// let mut map = BstMap::new();
    /// assert!(map.emplace(Reading { sensor: 7, celsius: 21.5 }).1);
    /// assert!(map.emplace((8, 19.0)).1);
    /// assert_eq!(map[&7], 21.5);
    /// ```
    pub fn emplace<P: Into<(K, V)>>(&mut self, pair: P) -> (Position, bool) {
        let (key, value) = pair.into();
        self.insert(key, value)
    }

    /// Inserts a key-value pair, reporting a duplicate key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if an entry with an equal key already exists; the
    /// map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// assert!(map.try_insert(1, "a").is_ok());
    /// assert_eq!(map.try_insert(1, "b"), Err(Error::DuplicateKey));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Position> {
        match self.insert(key, value) {
            (position, true) => Ok(position),
            (_, false) => Err(Error::DuplicateKey),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.get_mut(key)
    }

    /// Returns the stored key and its value for a key that compares equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, FnCompare};
    ///
    /// let mut map = BstMap::with_comparator(FnCompare::new(|a: &i32, b: &i32| a.abs() < b.abs()));
    /// map.insert(-5, "stored");
    /// assert_eq!(map.get_key_value(&5), Some((&-5, &"stored")));
    /// ```
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let handle = self.raw.find(key)?;
        Some(self.raw.entry(handle))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Removes the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map holds no such key; the map is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::{BstMap, Error};
    ///
    /// let mut map = BstMap::from([(1, "a")]);
    /// assert_eq!(map.erase(&1), Ok(()));
    /// assert_eq!(map.erase(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn erase(&mut self, key: &K) -> Result<()> {
        match self.remove_entry(key) {
            Some(_) => Ok(()),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove_entry(key)
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()`
    /// first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut counts: BstMap<char, usize> = BstMap::new();
    /// for c in "hello".chars() {
    ///     *counts.get_or_insert_default(c) += 1;
    /// }
    /// assert_eq!(counts[&'l'], 2);
    /// assert_eq!(counts.len(), 4);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let mut count: BstMap<&str, usize> = BstMap::new();
    ///
    /// // count the number of occurrences of letters in the vec
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count[&"a"], 3);
    /// assert_eq!(count[&"b"], 2);
    /// assert_eq!(count[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.raw.search(&key) {
            SearchResult::Found(handle) => Entry::Occupied(OccupiedEntry {
                handle,
                tree: &mut self.raw,
            }),
            SearchResult::Vacant(at) => Entry::Vacant(VacantEntry {
                key,
                at,
                tree: &mut self.raw,
            }),
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for BstMap<K, V, C> {
    /// Deep copy: the clone shares no node with `self` and uses a clone of the same
    /// comparator. The tree shape is preserved.
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash, C> Hash for BstMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for BstMap<K, V, C> {
    /// Two maps are equal when their entry sequences are equal; tree shapes may differ.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for BstMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for BstMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes every value in comparator order of the keys, each followed by one space.
///
/// ```
/// use sugi_tree::BstMap;
///
/// let map = BstMap::from([(3, 30), (1, 10), (2, 20)]);
/// assert_eq!(map.to_string(), "10 20 30 ");
/// ```
impl<K, V: fmt::Display, C> fmt::Display for BstMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.values() {
            write!(f, "{value} ")?;
        }
        Ok(())
    }
}

impl<K, V, C: Default> Default for BstMap<K, V, C> {
    fn default() -> Self {
        BstMap::with_comparator(C::default())
    }
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for BstMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        BstMap::from_iter_with_comparator(iter, C::default())
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for BstMap<K, V, C> {
    /// Inserts every pair; pairs whose key is already present are dropped.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for BstMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a BstMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut BstMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for BstMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugi_tree::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let entries: Vec<_> = map.into_iter().collect();
    /// assert_eq!(entries, [(1, "a"), (2, "b")]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, V, C: Compare<K>> Index<&K> for BstMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.front?;
        let node = self.nodes.get(handle);
        self.front = self.nodes.successor(handle);
        self.remaining -= 1;
        Some((node.key(), self.values.get(node.value())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            values: self.values,
            front: self.front,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.front?;
        let nodes = self.nodes;
        let node = nodes.get(handle);
        self.front = nodes.successor(handle);
        self.remaining -= 1;

        // SAFETY: `values` comes from a `&'a mut` borrow of the map's value arena, which
        // nothing else touches while this iterator lives. Every node owns a distinct value
        // slot and the successor walk yields each node once, so no slot is handed out twice.
        let value = unsafe { Arena::get_mut_ptr(self.values, node.value()) };
        Some((node.key(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    assert_impl_all!(BstMap<i32, String>: Send, Sync, Clone);
    assert_impl_all!(Iter<'static, i32, String>: Send, Sync);
    assert_impl_all!(IterMut<'static, i32, String>: Send, Sync);
    assert_impl_all!(ValuesMut<'static, i32, String>: Send, Sync);
    assert_not_impl_any!(IterMut<'static, i32, core::cell::Cell<u8>>: Sync);
    assert_not_impl_any!(IterMut<'static, core::cell::Cell<u8>, i32>: Send, Sync);
}
