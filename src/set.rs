//! The persistent set itself.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::error::HamtError;
use crate::hash::{self, trie_hash, UNCOMPUTED};
use crate::iter::Iter;
use crate::node::{Node, NodeRef};
use crate::ops::{add, find, without};
use crate::transient::Transient;

/// A persistent (immutable, structurally-shared) hash set backed by a
/// hash array mapped trie.
///
/// Every mutating operation returns a new set; the receiver is left
/// untouched and any subtree unaffected by the edit is shared, not
/// copied, with the original.
pub struct PersistentSet<T> {
    root: NodeRef<T>,
    count: usize,
    hash: AtomicI64,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<T> PersistentSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::empty()),
            count: 0,
            hash: AtomicI64::new(UNCOMPUTED),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns an iterator over references to the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }
}

impl<T> PersistentSet<T> {
    pub(crate) fn from_parts(root: NodeRef<T>, count: usize) -> Self {
        Self {
            root,
            count,
            hash: AtomicI64::new(UNCOMPUTED),
        }
    }

    /// The root node, for tests that need to assert on trie shape
    /// directly rather than only on observable content (`contains`,
    /// `structural_hash`, ...), which cannot distinguish a canonical
    /// trie from one carrying redundant wrapper nodes.
    #[cfg(test)]
    pub(crate) const fn root(&self) -> &NodeRef<T> {
        &self.root
    }
}

impl<T> Default for PersistentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Read operations — T: Hash + Eq
// ---------------------------------------------------------------------------

impl<T: Hash + Eq> PersistentSet<T> {
    /// Returns `true` if `value` is a member of the set.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        find::contains(&self.root, value, trie_hash(value), 0)
    }

    /// Returns `true` if `self` and `other` contain exactly the same
    /// elements, regardless of trie shape.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().all(|value| other.contains(value))
    }

    /// The order-independent structural hash of the set's contents,
    /// memoized after first computation.
    ///
    /// Two sets with equal `structural_hash` and equal `len` contain the
    /// same elements with overwhelming probability; [`equals`](Self::equals)
    /// is the exact check.
    #[must_use]
    pub fn structural_hash(&self) -> i64 {
        let cached = self.hash.load(Ordering::Relaxed);
        if cached != UNCOMPUTED {
            return cached;
        }
        let computed = hash::structural_hash(self.count, self.iter().map(hash::raw_hash));
        self.hash.store(computed, Ordering::Relaxed);
        computed
    }
}

// ---------------------------------------------------------------------------
// Write operations — T: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<T: Hash + Eq + Clone> PersistentSet<T> {
    /// Returns a new set with `value` added.
    ///
    /// If `value` is already a member, returns a set sharing the same
    /// root — no copying happens.
    #[must_use]
    pub fn include(&self, value: T) -> Self {
        let h = trie_hash(&value);
        let mut root = Arc::clone(&self.root);
        if !add::add(&mut root, value, h, 0, 0) {
            return Self {
                root: Arc::clone(&self.root),
                count: self.count,
                hash: AtomicI64::new(UNCOMPUTED),
            };
        }
        Self {
            root,
            count: self.count + 1,
            hash: AtomicI64::new(UNCOMPUTED),
        }
    }

    /// Returns a new set with `value` removed.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::KeyNotFound`] if `value` is not a member.
    pub fn exclude(&self, value: &T) -> Result<Self, HamtError<T>> {
        let h = trie_hash(value);
        let mut root = Arc::clone(&self.root);
        match without::without(&mut root, value, h, 0, 0) {
            without::WithoutOutcome::NotFound => Err(HamtError::KeyNotFound(value.clone())),
            without::WithoutOutcome::Empty => Ok(Self {
                root: Arc::new(Node::empty()),
                count: self.count - 1,
                hash: AtomicI64::new(UNCOMPUTED),
            }),
            without::WithoutOutcome::Changed | without::WithoutOutcome::SingleLeaf(_) => Ok(Self {
                root,
                count: self.count - 1,
                hash: AtomicI64::new(UNCOMPUTED),
            }),
        }
    }

    /// Returns a new set containing every element of `self` plus every
    /// element yielded by `values`.
    ///
    /// Implemented by opening a transient mutator over `self`'s root,
    /// running every insertion against nodes tagged with its `mutid`, and
    /// freezing the result — the bulk-insertion path the specification
    /// describes, rather than one persistent `include` per element.
    #[must_use]
    pub fn update<I: IntoIterator<Item = T>>(&self, values: I) -> Self {
        let mut transient = self.mutate();
        transient.update(values);
        transient.finish()
    }

    /// Opens a transient mutator seeded with this set's contents.
    ///
    /// Edits made through the mutator happen in place until
    /// [`Transient::finish`] freezes them back into a [`PersistentSet`].
    #[must_use]
    pub fn mutate(&self) -> Transient<T> {
        Transient::new(Arc::clone(&self.root), self.count)
    }

    /// Runs `f` against a fresh transient mutator and returns the frozen
    /// result.
    ///
    /// The mutator is always finished, even if `f` panics partway through
    /// — the in-progress edits are simply dropped along with the mutator,
    /// leaving `self` untouched.
    pub fn mutate_scoped<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut Transient<T>),
    {
        let mut transient = self.mutate();
        f(&mut transient);
        transient.finish()
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<T> Clone for PersistentSet<T> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            count: self.count,
            hash: AtomicI64::new(self.hash.load(Ordering::Relaxed)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentSet")
            .field("len", &self.count)
            .finish_non_exhaustive()
    }
}

impl<T: Hash + Eq> PartialEq for PersistentSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Hash + Eq> Eq for PersistentSet<T> {}

impl<T: Hash + Eq> Hash for PersistentSet<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i64(self.structural_hash());
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for PersistentSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            *self = self.include(value);
        }
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for PersistentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a PersistentSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
