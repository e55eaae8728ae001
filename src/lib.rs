//! Red-black tree collections for Rust.
//!
//! This crate provides an ordered map and an ordered set built on one red-black engine, plus
//! order-statistic variants of both:
//!
//! - [`RBTreeMap`] / [`RBTreeSet`] - ordered collections with strict and weak
//!   successor/predecessor queries alongside the usual `BTreeMap`/`BTreeSet` surface
//! - [`OSRBTreeMap`] / [`OSRBTreeSet`] - the same collections with O(log n)
//!   [`select`](TreeMap::select) and [`rank`](TreeMap::rank)
//!
//! All four are instantiations of [`TreeMap`] and [`TreeSet`], generic over a key ordering
//! ([`Compare`]) and an augmentation ([`Augment`]) that observes every structural mutation.
//!
//! # Example
//!
//! ```
//! use rubi_tree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Standard map operations work as expected
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! let (name, score) = scores.select(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85)); // Keys are sorted alphabetically
//!
//! assert_eq!(scores.rank(&"Carol"), (2, Some(&92)));
//! assert_eq!(scores.rank(&"Bea"), (1, None)); // would sit between Alice and Bob
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Neighbour queries
//! assert_eq!(scores.strict_successor_of(&"Alice"), Some((&"Bob", &85)));
//! assert_eq!(scores.weak_predecessor_of(&"Bz"), Some((&"Bob", &85)));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom orderings** - any `Fn(&K, &K) -> Ordering` closure can order a collection
//! - **Pluggable bookkeeping** - [`Augment`] hooks fire on insert, remove and every rotation
//!
//! # Implementation
//!
//! Nodes live in a slot arena addressed by [`Handle`]s; slot `0` is a shared black sentinel
//! standing in for every leaf and for the root's parent. Removing a node with two children
//! moves its in-order successor's entry into its slot and unlinks the successor instead, so at
//! most one node is ever spliced out per removal.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: `IterMut` hands out disjoint `&mut` into the arena through a raw pointer.
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

mod augment;
mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod tree_map;
pub mod tree_set;

pub use augment::{Augment, NoAugment, TreeView};
pub use compare::{Compare, Natural};
pub use error::{Result, TreeError};
pub use order_statistic::{Rank, SubtreeSizes};
pub use raw::Handle;
pub use tree_map::{OSRBTreeMap, RBTreeMap, TreeMap};
pub use tree_set::{OSRBTreeSet, RBTreeSet, TreeSet};
