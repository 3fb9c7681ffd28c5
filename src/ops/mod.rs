//! Recursive trie operations: `add`, `find`, `without`.
//!
//! Each operation walks the trie by hand rather than through a shared
//! generic traversal, because the three differ in what they do at a
//! matching slot (replace vs. compare vs. delete-and-maybe-inline) more
//! than they share.

pub mod add;
pub mod find;
pub mod without;
