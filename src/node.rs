//! HAMT trie node types.
//!
//! A node is one of two variants:
//!
//! - [`Bitmap`](Node::Bitmap) — a compact, bitmap-indexed array of up to
//!   32 slots, each either an inline element or a child subtree.
//! - [`Collision`](Node::Collision) — a linear bucket for elements that
//!   share a full 32-bit trie hash.
//!
//! Nodes are reached through [`NodeRef`], an atomically reference-counted
//! pointer: the same node may be reachable from arbitrarily many
//! [`PersistentSet`](crate::PersistentSet) values at once, so ownership is
//! "longest holder", not single-owner.

use std::sync::Arc;

/// Shared pointer to a node. Cloning is O(1) — it bumps a reference count,
/// it does not copy the subtree. This is what makes `include`/`exclude`
/// cheap: only the path from the root to the edited slot is ever copied.
pub type NodeRef<T> = Arc<Node<T>>;

/// One slot of a bitmap node's compact array.
pub enum Slot<T> {
    /// An inline element.
    Leaf(T),
    /// A child subtree.
    Child(NodeRef<T>),
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(value) => Self::Leaf(value.clone()),
            Self::Child(child) => Self::Child(Arc::clone(child)),
        }
    }
}

/// A HAMT trie node.
pub enum Node<T> {
    /// Bitmap-compressed node.
    ///
    /// Invariant: `array.len() == bitmap.count_ones()`.
    Bitmap {
        /// Bit `i` is set iff slot `i` is occupied.
        bitmap: u32,
        /// Dense array of occupied slots, compact-indexed by `bitmap`.
        array: Vec<Slot<T>>,
        /// Generation tag of the transient edit that owns this node in
        /// place. Zero means frozen.
        mutid: u64,
    },
    /// Bucket for elements sharing a full 32-bit trie hash.
    ///
    /// Invariant: `array.len() >= 2` (a singleton is always promoted back
    /// to a bitmap leaf — see [`crate::ops::without`]).
    Collision {
        /// The hash shared by every element in `array`.
        hash: u32,
        /// The colliding elements, pairwise distinct under `Eq`.
        array: Vec<T>,
        /// Generation tag; zero means frozen.
        mutid: u64,
    },
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Bitmap { bitmap, array, mutid } => Self::Bitmap {
                bitmap: *bitmap,
                array: array.clone(),
                mutid: *mutid,
            },
            Self::Collision { hash, array, mutid } => Self::Collision {
                hash: *hash,
                array: array.clone(),
                mutid: *mutid,
            },
        }
    }
}

impl<T> Node<T> {
    /// The shared, frozen, empty bitmap node every empty set starts from.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Bitmap {
            bitmap: 0,
            array: Vec::new(),
            mutid: 0,
        }
    }

    /// This node's generation tag. Zero means frozen.
    #[must_use]
    pub const fn mutid(&self) -> u64 {
        match self {
            Self::Bitmap { mutid, .. } | Self::Collision { mutid, .. } => *mutid,
        }
    }

    fn set_mutid(&mut self, new_mutid: u64) {
        match self {
            Self::Bitmap { mutid, .. } | Self::Collision { mutid, .. } => *mutid = new_mutid,
        }
    }

    /// Number of elements directly held by this node (inline leaves for a
    /// bitmap node, all entries for a collision node) — not a recursive
    /// element count.
    #[must_use]
    pub fn local_len(&self) -> usize {
        match self {
            Self::Bitmap { array, .. } => array.len(),
            Self::Collision { array, .. } => array.len(),
        }
    }

}

/// Ensures `*node` is uniquely owned and tagged with `mutid`, returning a
/// mutable view onto it to edit in place (the entirety of the core's
/// copy-on-write discipline: §4.2.6).
///
/// When `node`'s existing tag already matches `mutid`, `*node` is already
/// owned by the in-progress transient edit; if nothing else holds a
/// reference to it (checked directly against the real `Arc`, not a
/// clone of it — a clone would always report two holders and defeat the
/// whole point), the node is mutated in place. Any other case — a
/// frozen node, a node tagged for a different edit, or a shared node —
/// clones first. `mutid == 0` always clones: persistent edits never
/// mutate in place.
pub(crate) fn own_mut<T: Clone>(node: &mut NodeRef<T>, mutid: u64) -> &mut Node<T> {
    if mutid != 0 && node.mutid() == mutid {
        if let Some(inner) = Arc::get_mut(node) {
            return inner;
        }
    }
    let mut cloned = (**node).clone();
    cloned.set_mutid(mutid);
    *node = Arc::new(cloned);
    Arc::get_mut(node).expect("freshly allocated Arc is uniquely owned")
}
