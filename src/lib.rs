//! Persistent hash set based on a hash array mapped trie (HAMT).
//!
//! A [`PersistentSet`] never mutates in place: every `include`/`exclude`
//! returns a new set, sharing whatever subtrees the edit didn't touch with
//! the set it was derived from. For edits that would otherwise pay for
//! that sharing discipline needlessly — building up a set element by
//! element, say — [`Transient`] offers a scoped, single-owner mutator that
//! edits nodes in place and freezes back into an ordinary `PersistentSet`.
//!
//! # Key properties
//!
//! - **Structural sharing**: O(log₃₂ n) copy on every edit, not O(n)
//! - **Order-independent structural hash**: two sets with the same
//!   elements hash the same regardless of insertion order
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries for
//!   Fast and Lean Immutable JVM Collections", OOPSLA 2015

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bitops;
pub mod hash;
pub mod iter;
pub mod node;

mod error;
mod ops;
mod set;
mod transient;

#[cfg(test)]
mod tests;

pub use error::HamtError;
pub use set::PersistentSet;
pub use transient::Transient;
