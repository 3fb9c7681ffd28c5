//! Insertion — COW (or in-place, under a live `mutid`) path-copy add.

use crate::bitops::{bitpos, compact_index, BITS_PER_LEVEL, MAX_SHIFT};
use crate::hash::trie_hash;
use crate::node::{own_mut, Node, NodeRef, Slot};
use std::sync::Arc;

/// Adds `value` (with trie hash `hash`) to the subtree rooted at `*node`,
/// mutating `*node` in place to hold the result. Returns `true` if a new
/// element was inserted, `false` if `value` was already present (in
/// which case `*node` is left untouched).
///
/// `mutid` is the generation tag of an in-progress transient edit, or
/// `0` for a persistent (always-copying) edit. The caller controls
/// sharing by what it passes as `node`: a persistent edit passes a
/// freshly cloned `Arc` (so the original stays reachable unchanged
/// elsewhere); a transient edit passes the real owned slot, which is
/// what lets `mutid`-tagged nodes be detected as uniquely held and
/// edited in place instead of cloned.
pub fn add<T: Eq + Clone>(node: &mut NodeRef<T>, value: T, hash: u32, shift: u32, mutid: u64) -> bool {
    if crate::ops::find::contains(node, &value, hash, shift) {
        return false;
    }
    insert(node, value, hash, shift, mutid);
    true
}

/// Inserts `value`, which the caller has already established is absent
/// from this subtree — every node from here down to the insertion point
/// is guaranteed to change, so each level can be owned eagerly without
/// wasting a clone on a no-op.
fn insert<T: Eq + Clone>(node: &mut NodeRef<T>, value: T, hash: u32, shift: u32, mutid: u64) {
    match &**node {
        Node::Bitmap { bitmap, array, .. } => {
            let bit = bitpos(hash, shift);
            if *bitmap & bit == 0 {
                let pos = compact_index(*bitmap, bit);
                if let Node::Bitmap { bitmap, array, .. } = own_mut(node, mutid) {
                    array.insert(pos, Slot::Leaf(value));
                    *bitmap |= bit;
                }
                return;
            }

            let pos = compact_index(*bitmap, bit);
            if matches!(array[pos], Slot::Child(_)) {
                let Node::Bitmap { array, .. } = own_mut(node, mutid) else {
                    unreachable!("matched Bitmap above")
                };
                let Slot::Child(child) = &mut array[pos] else {
                    unreachable!("checked Child above")
                };
                insert(child, value, hash, shift + BITS_PER_LEVEL, mutid);
                return;
            }

            // Slot holds a different leaf: split it into a fresh subtree
            // housing both elements.
            let existing = match &array[pos] {
                Slot::Leaf(existing) => existing.clone(),
                Slot::Child(_) => unreachable!("checked Leaf above"),
            };
            let existing_hash = trie_hash(&existing);
            let child = if existing_hash == hash {
                // Full 32-bit hash agreement: the two elements belong in
                // a collision node right here, not buried under however
                // many single-child bitmaps their shared fragments would
                // otherwise produce.
                Arc::new(Node::Collision {
                    hash,
                    array: vec![existing, value],
                    mutid,
                })
            } else {
                two_leaf_subtree(existing, existing_hash, value, hash, shift + BITS_PER_LEVEL, mutid)
            };
            if let Node::Bitmap { array, .. } = own_mut(node, mutid) {
                array[pos] = Slot::Child(child);
            }
        }
        Node::Collision { hash: node_hash, .. } => {
            debug_assert_eq!(
                *node_hash, hash,
                "a collision node is only reached once the full 32-bit hash matches"
            );
            if let Node::Collision { array, .. } = own_mut(node, mutid) {
                array.push(value);
            }
        }
    }
}

/// Builds the smallest subtree containing exactly `a` and `b`, descending
/// past however many fragments their hashes share. Only called with
/// `hash_a != hash_b` (the caller builds a collision node directly when
/// the full hashes agree), so the two are guaranteed to diverge at some
/// shift at or before [`MAX_SHIFT`]; the collision fallback below is an
/// invariant guard against that guarantee ever being violated, not a
/// path this function is expected to take.
fn two_leaf_subtree<T>(a: T, hash_a: u32, b: T, hash_b: u32, shift: u32, mutid: u64) -> NodeRef<T> {
    if shift > MAX_SHIFT {
        return Arc::new(Node::Collision {
            hash: hash_a,
            array: vec![a, b],
            mutid,
        });
    }

    let bit_a = bitpos(hash_a, shift);
    let bit_b = bitpos(hash_b, shift);

    if bit_a == bit_b {
        let child = two_leaf_subtree(a, hash_a, b, hash_b, shift + BITS_PER_LEVEL, mutid);
        Arc::new(Node::Bitmap {
            bitmap: bit_a,
            array: vec![Slot::Child(child)],
            mutid,
        })
    } else {
        let (first, second) = if bit_a < bit_b { (a, b) } else { (b, a) };
        Arc::new(Node::Bitmap {
            bitmap: bit_a | bit_b,
            array: vec![Slot::Leaf(first), Slot::Leaf(second)],
            mutid,
        })
    }
}
