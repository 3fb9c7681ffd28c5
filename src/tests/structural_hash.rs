//! Order-independent structural hashing (spec.md §8 property 5, S5).

use crate::PersistentSet;

/// Property 5: equal sets hash equal, regardless of insertion order.
#[test]
fn equal_sets_hash_equal() {
    let a = PersistentSet::new().include(1).include(2).include(3);
    let b = PersistentSet::new().include(3).include(2).include(1);

    assert!(a.equals(&b));
    assert_eq!(a.structural_hash(), b.structural_hash());
}

/// The empty set has a deterministic, reproducible hash.
#[test]
fn empty_set_hash_is_stable() {
    let a: PersistentSet<i32> = PersistentSet::new();
    let b: PersistentSet<i32> = PersistentSet::new();
    assert_eq!(a.structural_hash(), b.structural_hash());
}

/// Sets of different length never share a structural hash by accident
/// of the count term dropping out.
#[test]
fn count_is_part_of_the_hash() {
    let a = PersistentSet::new().include(1);
    let b = PersistentSet::new().include(1).include(2);
    assert_ne!(a.structural_hash(), b.structural_hash());
}

/// The hash is memoized: repeated calls on the same set return the
/// identical value (and don't, say, recompute off a moved-from root).
#[test]
fn hash_is_memoized_and_stable_across_calls() {
    let set = PersistentSet::new().include("a").include("b").include("c");
    let first = set.structural_hash();
    let second = set.structural_hash();
    assert_eq!(first, second);
}

/// S5: bulk `update` is insertion-order independent, both in contents
/// and in structural hash.
#[test]
fn s5_bulk_update_order_independence() {
    let base_forward = PersistentSet::new().update([1, 2, 3]);
    let forward = base_forward.update([2, 4]);

    let base_backward = PersistentSet::new().update([4, 3, 2, 1]);
    let backward = base_backward.clone();

    let expected = PersistentSet::new().include(1).include(2).include(3).include(4);

    assert!(forward.equals(&expected));
    assert!(backward.equals(&expected));
    assert_eq!(forward.structural_hash(), backward.structural_hash());
    assert_eq!(forward.structural_hash(), expected.structural_hash());
}

/// A set rebuilt by adding then removing an element returns to the
/// original's structural hash (it is literally the same shape, since
/// removal inlines canonically).
#[test]
fn hash_returns_after_add_then_remove() {
    let original = PersistentSet::new().include(1).include(2).include(3);
    let roundtripped = original.include(4).exclude(&4).expect("just inserted");
    assert_eq!(original.structural_hash(), roundtripped.structural_hash());
}
