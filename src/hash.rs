//! Element hashing and the order-independent structural hash.
//!
//! Two distinct hashes are in play. The *trie hash* is a 32-bit value
//! folded from the host hash and used purely for descent through the
//! trie (`bitops::slot`/`bitops::bitpos`). The *structural hash* of a
//! whole set is a separate, order-independent accumulation over the
//! raw (un-folded) host hash of every element, reproduced bit-for-bit
//! from the reference algorithm so that two builds agree on it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Sentinel marking an uncomputed structural hash.
pub const UNCOMPUTED: i64 = -1;

/// The structural hash never legitimately lands on [`UNCOMPUTED`]; a
/// genuine computation that does is remapped to this constant instead.
const SENTINEL_REMAP: i64 = 590_923_713;

const STRUCTURAL_SEED: u64 = 1_927_868_237;
const MIX_CONST_1: u64 = 89_869_747;
const MIX_CONST_2: u64 = 3_644_798_167;
const FINALIZE_MUL: u64 = 69069;
const FINALIZE_ADD: u64 = 907_133_923;

/// Computes the raw 64-bit host hash of a value.
#[must_use]
pub fn raw_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Folds a raw 64-bit host hash into the 32-bit hash used for trie
/// descent, by XORing its high and low halves.
#[inline]
#[must_use]
pub const fn fold_to_trie_hash(raw: u64) -> u32 {
    ((raw >> 32) as u32) ^ (raw as u32)
}

/// Computes the 32-bit trie hash of a value directly.
#[must_use]
pub fn trie_hash<T: Hash + ?Sized>(value: &T) -> u32 {
    fold_to_trie_hash(raw_hash(value))
}

/// Computes the order-independent structural hash of a set of `count`
/// elements whose raw host hashes are given by `raw_hashes`.
///
/// Reproduces the reference folding constants exactly; any test that
/// relies on hash-equality across builds depends on this being bit-exact.
#[must_use]
pub fn structural_hash(count: usize, raw_hashes: impl IntoIterator<Item = u64>) -> i64 {
    let mut h = STRUCTURAL_SEED.wrapping_mul(count as u64 + 1);
    for hx in raw_hashes {
        h ^= (hx ^ (hx << 16) ^ MIX_CONST_1).wrapping_mul(MIX_CONST_2);
    }
    h = h.wrapping_mul(FINALIZE_MUL).wrapping_add(FINALIZE_ADD);

    let signed = h as i64;
    if signed == UNCOMPUTED {
        SENTINEL_REMAP
    } else {
        signed
    }
}
