//! Ordering strategies for [`BstMap`](crate::BstMap).
//!
//! Every ordering decision a map makes goes through a single strict-weak-order
//! predicate, [`Compare::less`]. Two keys `a` and `b` are considered equal when neither
//! `less(a, b)` nor `less(b, a)` holds. The strategy is chosen when the map is built and
//! never changes afterwards.

use core::cmp::Ordering;
use core::fmt;

/// A strict weak ordering over keys of type `K`.
///
/// # Examples
///
/// ```
/// use sugi_tree::{BstMap, Compare};
///
/// #[derive(Clone, Default)]
/// struct ByLength;
///
/// impl Compare<&str> for ByLength {
///     fn less(&self, a: &&str, b: &&str) -> bool {
///         a.len() < b.len()
///     }
/// }
///
/// let mut map = BstMap::with_comparator(ByLength);
/// map.insert("ccc", 3);
/// map.insert("a", 1);
/// map.insert("bb", 2);
/// // "zz" has the same length as "bb", so it is a duplicate under this ordering.
/// assert!(!map.insert("zz", 0).1);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["a", "bb", "ccc"]);
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Three-way comparison derived from [`less`](Compare::less).
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Ascending order by [`Ord`]. This is the default strategy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Descending order by [`Ord`].
///
/// ```
/// use sugi_tree::{BstMap, Greater};
///
/// let map = BstMap::from_iter_with_comparator([(1, 'a'), (3, 'c'), (2, 'b')], Greater);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a > b
    }
}

/// Direction selected at runtime, for callers that only learn the desired order after
/// the key type is fixed (configuration, user input).
///
/// ```
/// use sugi_tree::{BstMap, Order};
///
/// let descending = true;
/// let order = if descending { Order::Descending } else { Order::Ascending };
///
/// let mut map = BstMap::with_comparator(order);
/// map.insert(1, ());
/// map.insert(2, ());
/// assert_eq!(map.first_key_value(), Some((&2, &())));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl<K: Ord + ?Sized> Compare<K> for Order {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        match self {
            Order::Ascending => a < b,
            Order::Descending => a > b,
        }
    }
}

/// Adapts a closure `Fn(&K, &K) -> bool` into a [`Compare`] strategy.
///
/// ```
/// use sugi_tree::{BstMap, FnCompare};
///
/// let by_abs = FnCompare::new(|a: &i32, b: &i32| a.abs() < b.abs());
/// let mut map = BstMap::with_comparator(by_abs);
/// map.insert(-3, "minus three");
/// map.insert(2, "two");
/// assert!(!map.insert(3, "three").1);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [2, -3]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnCompare<F>(F);

impl<F> FnCompare<F> {
    /// Wraps `less` as an ordering strategy.
    pub const fn new(less: F) -> Self {
        FnCompare(less)
    }

    /// Unwraps the closure.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<K: ?Sized, F> Compare<K> for FnCompare<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnCompare<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCompare").finish_non_exhaustive()
    }
}

impl<K: ?Sized, C: Compare<K> + ?Sized> Compare<K> for &C {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (**self).less(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builtin_strategies() {
        assert!(Less.less(&1, &2));
        assert!(!Less.less(&2, &2));
        assert!(Greater.less(&2, &1));
        assert!(Order::Ascending.less(&1, &2));
        assert!(Order::Descending.less(&2, &1));
        assert_eq!(Order::default(), Order::Ascending);
    }

    #[test]
    fn three_way_compare_derives_from_less() {
        assert_eq!(Less.compare(&1, &2), Ordering::Less);
        assert_eq!(Less.compare(&2, &1), Ordering::Greater);
        assert_eq!(Less.compare(&2, &2), Ordering::Equal);
        assert_eq!(Greater.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn closures_and_references_compare() {
        let modulo = FnCompare::new(|a: &u32, b: &u32| a % 10 < b % 10);
        assert!(modulo.less(&21, &19));
        assert_eq!(modulo.compare(&3, &13), Ordering::Equal);

        let by_ref = &Greater;
        assert!(by_ref.less(&"b", &"a"));
    }
}
