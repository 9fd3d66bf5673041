use crate::raw::{Handle, Link};

/// A cursor naming one entry of a [`BstMap`](crate::BstMap), or the end sentinel.
///
/// Positions are plain values: they do not borrow the map. Dereference one with
/// [`BstMap::entry_at`](crate::BstMap::entry_at) or
/// [`BstMap::value_at_mut`](crate::BstMap::value_at_mut) and advance it in sorted order
/// with [`BstMap::next_position`](crate::BstMap::next_position).
///
/// Two positions are equal when they name the same node; all end sentinels are equal.
/// A position is only meaningful for the map that produced it, and only until that
/// map's structure next changes (an insert other than the one that returned it, an
/// erase, a clear or a balance).
///
/// # Examples
///
/// ```
/// use sugi_tree::{BstMap, Position};
///
/// let mut map = BstMap::new();
/// map.insert(2, "b");
/// map.insert(1, "a");
///
/// let mut pos = map.begin();
/// let mut seen = Vec::new();
/// while pos != map.end() {
///     seen.push(*map.entry_at(pos).unwrap().1);
///     pos = map.next_position(pos);
/// }
/// assert_eq!(seen, ["a", "b"]);
/// assert!(map.find(&3).is_end());
/// assert_eq!(map.find(&3), Position::END);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub struct Position(pub(crate) Link);

impl Position {
    /// The sentinel one past the last entry, also returned by failed lookups.
    pub const END: Position = Position(None);

    pub(crate) const fn at(handle: Handle) -> Self {
        Position(Some(handle))
    }

    /// Returns `true` if this is the end sentinel.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.0.is_none()
    }
}
