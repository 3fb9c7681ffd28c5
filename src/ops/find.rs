//! Lookup — traverses the trie to test membership.

use crate::bitops::{bitpos, compact_index};
use crate::node::{Node, NodeRef, Slot};

/// Tests whether `value` (with trie hash `hash`) is present in the
/// subtree rooted at `node`.
pub fn contains<T: Eq>(node: &NodeRef<T>, value: &T, hash: u32, shift: u32) -> bool {
    match &**node {
        Node::Bitmap { bitmap, array, .. } => {
            let bit = bitpos(hash, shift);
            if bitmap & bit == 0 {
                return false;
            }
            let pos = compact_index(*bitmap, bit);
            match &array[pos] {
                Slot::Leaf(candidate) => candidate == value,
                Slot::Child(child) => contains(child, value, hash, shift + crate::bitops::BITS_PER_LEVEL),
            }
        }
        Node::Collision { hash: node_hash, array, .. } => {
            *node_hash == hash && array.iter().any(|candidate| candidate == value)
        }
    }
}
