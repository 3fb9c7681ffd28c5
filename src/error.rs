//! Error type for fallible set operations.

use std::fmt;

/// Errors raised by [`PersistentSet`](crate::PersistentSet) and
/// [`Transient`](crate::Transient) operations.
#[derive(Debug)]
pub enum HamtError<T> {
    /// The requested element is not a member of the set.
    KeyNotFound(T),
    /// A [`Transient`](crate::Transient) was used after `finish` had
    /// already consumed it.
    MutatorFinished,
}

impl<T: fmt::Debug> fmt::Display for HamtError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound(value) => write!(f, "element not found: {value:?}"),
            Self::MutatorFinished => write!(f, "transient mutator already finished"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for HamtError<T> {}
