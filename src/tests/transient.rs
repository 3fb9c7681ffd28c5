//! The transient mutator (spec.md §4.4, §8 S4, property 6).

use std::panic::{self, AssertUnwindSafe};

use crate::PersistentSet;

#[test]
fn mutate_then_finish_produces_equal_set() {
    let set = PersistentSet::new().include(1).include(2);
    let mut t = set.mutate();
    t.include(3);
    let finished = t.finish();

    assert_eq!(finished.len(), 3);
    assert!(finished.contains(&1));
    assert!(finished.contains(&2));
    assert!(finished.contains(&3));
}

/// Property 6: applying the same sequence of edits through a mutator
/// and through plain `include`/`exclude` produce equal sets.
#[test]
fn mutator_equivalence() {
    let base = PersistentSet::new().include("a").include("b").include("c");

    let via_persistent = base
        .include("z")
        .exclude(&"a")
        .expect("a present")
        .include("y");

    let via_transient = base.mutate_scoped(|t| {
        t.include("z");
        t.exclude(&"a").expect("a present");
        t.include("y");
    });

    assert!(via_persistent.equals(&via_transient));
    assert_eq!(via_persistent.structural_hash(), via_transient.structural_hash());
}

/// Removing the last element through a mutator resets it to a fresh,
/// still-usable empty root (spec.md §9 open question: tagged with the
/// mutator's own generation, not frozen at 0).
#[test]
fn mutator_survives_emptying_and_refilling() {
    let set = PersistentSet::new().include(1);
    let mut t = set.mutate();
    t.exclude(&1).expect("present");
    assert!(t.is_empty());
    t.include(2);
    let finished = t.finish();
    assert_eq!(finished.len(), 1);
    assert!(finished.contains(&2));
}

/// Excluding an absent element through a mutator fails without
/// disturbing the mutator's existing state.
#[test]
fn mutator_exclude_absent_leaves_state_intact() {
    let set = PersistentSet::new().include(1).include(2);
    let mut t = set.mutate();
    assert!(t.exclude(&99).is_err());
    assert_eq!(t.len(), 2);
    assert!(t.contains(&1));
    assert!(t.contains(&2));
}

/// S4: inside a scoped mutator, perform `include`, `exclude`, then
/// panic. After the scope unwinds, the original set is unchanged — the
/// mutator's half-finished edits are never handed back.
#[test]
fn s4_scoped_mutator_panic_leaves_original_untouched() {
    let set = PersistentSet::new().include("a").include("b");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        set.mutate_scoped(|t| {
            t.include("z");
            t.exclude(&"a").expect("a present");
            panic!("simulated callback failure");
        });
    }));

    assert!(result.is_err());
    assert_eq!(set.len(), 2);
    assert!(set.contains(&"a"));
    assert!(set.contains(&"b"));
    assert!(!set.contains(&"z"));
}

/// Two mutators derived from the same persistent ancestor operate on
/// disjoint node populations: edits through one are invisible to the
/// other's finished result.
#[test]
fn independent_mutators_from_shared_ancestor_commute() {
    let ancestor = PersistentSet::new().include(1).include(2);

    let left = ancestor.mutate_scoped(|t| {
        t.include(10);
    });
    let right = ancestor.mutate_scoped(|t| {
        t.include(20);
    });

    assert_eq!(ancestor.len(), 2);
    assert!(!left.contains(&20));
    assert!(!right.contains(&10));
    assert!(left.contains(&10));
    assert!(right.contains(&20));
}
