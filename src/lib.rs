//! A parent-linked binary search tree map for Rust.
//!
//! This crate provides [`BstMap`], an ordered key-value map stored as an unbalanced
//! binary search tree in which every node also links to its parent. The parent links
//! make forward iteration possible without an explicit stack, and let a [`Position`]
//! be a plain value that can be advanced with
//! [`next_position`](BstMap::next_position).
//!
//! # Example
//!
//! ```
//! use sugi_tree::{BstMap, Error};
//!
//! let mut ages = BstMap::new();
//! ages.insert("Carol", 41);
//! ages.insert("Alice", 33);
//! ages.insert("Bob", 27);
//!
//! assert_eq!(ages.get(&"Bob"), Some(&27));
//! assert_eq!(ages.insert("Bob", 99).1, false); // keys are unique
//! assert_eq!(ages.erase(&"Dave"), Err(Error::KeyNotFound));
//!
//! // Iteration follows the comparator.
//! let names: Vec<_> = ages.keys().copied().collect();
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // Display prints the values in key order.
//! assert_eq!(ages.to_string(), "33 27 41 ");
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Pluggable ordering** - Any [`Compare`] strategy, including closures via [`FnCompare`]
//! - **On-demand balancing** - The tree never rotates; [`BstMap::balance`] rebuilds it
//!   to minimal height when asked
//!
//! # Implementation
//!
//! Nodes and values live in two handle-addressed arenas with free lists, so links are
//! small integers rather than pointers and removed slots are recycled. Removing a node
//! with two children moves its in-order successor's payload into it and unlinks the
//! successor instead.
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `trace` for each
//! removal case and `debug`/`warn` for the outcome of a rebalance. Nothing is printed
//! unless the application installs a logger.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: Unsafe code is needed for the mutable iterators to hand out disjoint values.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod position;
mod raw;

pub mod bst_map;

pub use bst_map::BstMap;
pub use compare::{Compare, FnCompare, Greater, Less, Order};
pub use error::{Error, Result};
pub use position::Position;
