//! Removal — COW (or in-place, under a live `mutid`) path-copy delete
//! with canonical singleton inlining.

use crate::bitops::{bitpos, compact_index, BITS_PER_LEVEL};
use crate::node::{own_mut, Node, NodeRef, Slot};

/// Outcome of removing a value from a subtree.
pub enum WithoutOutcome<T> {
    /// The value was not present — `*node` is left untouched.
    NotFound,
    /// The value was removed and the subtree is now empty.
    Empty,
    /// The value was removed and exactly one element remains, held
    /// directly as a leaf rather than nested in a child node. A caller
    /// that is itself a bitmap node should inline this leaf into its own
    /// slot rather than keep pointing at the (now needlessly indirect)
    /// subtree (§4.2.3's compaction rule); a top-level caller with no
    /// parent to inline into can treat this the same as [`Self::Changed`]
    /// — `*node` already reflects this state correctly.
    SingleLeaf(T),
    /// The value was removed; `*node` has been updated in place (or
    /// cloned and reassigned) to reflect the new, still-multi-element
    /// state.
    Changed,
}

/// Removes `value` (with trie hash `hash`) from the subtree rooted at
/// `*node`. See [`super::add::add`] for the ownership contract `mutid`
/// and `node` participate in.
pub fn without<T: Eq + Clone>(
    node: &mut NodeRef<T>,
    value: &T,
    hash: u32,
    shift: u32,
    mutid: u64,
) -> WithoutOutcome<T> {
    if !crate::ops::find::contains(node, value, hash, shift) {
        return WithoutOutcome::NotFound;
    }
    remove(node, value, hash, shift, mutid)
}

/// Removes a value already established (by the caller) to be present —
/// every node from here down to the removal point is guaranteed to
/// change, so each level can be owned eagerly.
fn remove<T: Eq + Clone>(node: &mut NodeRef<T>, value: &T, hash: u32, shift: u32, mutid: u64) -> WithoutOutcome<T> {
    match &**node {
        Node::Bitmap { bitmap, array, .. } => {
            let bit = bitpos(hash, shift);
            let pos = compact_index(*bitmap, bit);

            if matches!(array[pos], Slot::Child(_)) {
                let Node::Bitmap { array, .. } = own_mut(node, mutid) else {
                    unreachable!("matched Bitmap above")
                };
                let Slot::Child(child) = &mut array[pos] else {
                    unreachable!("checked Child above")
                };
                return match remove(child, value, hash, shift + BITS_PER_LEVEL, mutid) {
                    WithoutOutcome::NotFound => unreachable!("presence already established by `without`"),
                    WithoutOutcome::Changed => WithoutOutcome::Changed,
                    WithoutOutcome::Empty => remove_slot(node, mutid, bit, pos),
                    WithoutOutcome::SingleLeaf(leaf) => {
                        let Node::Bitmap { array, .. } = own_mut(node, mutid) else {
                            unreachable!("matched Bitmap above")
                        };
                        array[pos] = Slot::Leaf(leaf);
                        // The inlined leaf may leave *this* node itself
                        // down to a single leaf too (a deep-split chain
                        // collapsing level by level) — re-run the same
                        // compaction check so the signal keeps bubbling
                        // up instead of stopping after one level.
                        if array.len() == 1 {
                            if let Slot::Leaf(leaf) = &array[0] {
                                return WithoutOutcome::SingleLeaf(leaf.clone());
                            }
                        }
                        WithoutOutcome::Changed
                    }
                };
            }

            // Slot holds the leaf being removed (guaranteed by the caller).
            if array.len() == 1 {
                return WithoutOutcome::Empty;
            }
            remove_slot(node, mutid, bit, pos)
        }
        Node::Collision { array, .. } => {
            let pos = array
                .iter()
                .position(|existing| existing == value)
                .expect("presence already established by `without`");
            if array.len() == 2 {
                let survivor = array[1 - pos].clone();
                return WithoutOutcome::SingleLeaf(survivor);
            }
            let Node::Collision { array, .. } = own_mut(node, mutid) else {
                unreachable!("matched Collision above")
            };
            array.remove(pos);
            WithoutOutcome::Changed
        }
    }
}

/// Removes the occupied slot at `pos`/`bit` from a bitmap node, reporting
/// [`WithoutOutcome::Empty`] if it was the last slot, or
/// [`WithoutOutcome::SingleLeaf`] if exactly one leaf remains (the
/// compaction case a parent must inline).
fn remove_slot<T: Clone>(node: &mut NodeRef<T>, mutid: u64, bit: u32, pos: usize) -> WithoutOutcome<T> {
    let Node::Bitmap { bitmap, array, .. } = own_mut(node, mutid) else {
        unreachable!("caller dispatches on Bitmap")
    };
    array.remove(pos);
    *bitmap &= !bit;
    if array.len() == 1 {
        if let Slot::Leaf(leaf) = &array[0] {
            return WithoutOutcome::SingleLeaf(leaf.clone());
        }
    }
    WithoutOutcome::Changed
}
