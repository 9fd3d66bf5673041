//! Error type for fallible map operations.
//!
//! Nothing in this crate is fatal: a failed insert or erase leaves the map exactly as
//! it was and reports the outcome through a return value. Lookups that miss return
//! `None` or [`Position::END`](crate::Position::END) rather than an error.

use thiserror::Error;

/// Reasons a map operation declined to change the map.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An entry with an equal key (under the map's comparator) is already present.
    ///
    /// Returned by [`BstMap::try_insert`](crate::BstMap::try_insert). The plain insert
    /// methods report the same condition through their `bool` flag.
    #[error("key already present")]
    DuplicateKey,

    /// No entry with the requested key exists.
    ///
    /// Returned by [`BstMap::erase`](crate::BstMap::erase).
    #[error("key not found")]
    KeyNotFound,
}

/// A `Result` alias with [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;
