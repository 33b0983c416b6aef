//! An ordered set backed by a red black tree whose nodes live in a typed arena.
//!
//! `RedBlackSet<T>` keeps its keys sorted and offers `O(log n)` insertion, removal and lookup,
//! bidirectional cursors, range queries and rank access.

pub mod arena;
mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
