use std::result;
use thiserror::Error;

/// Errors reported by fallible operations on a `RedBlackSet<T>`.
///
/// The absence of a key is never an error: lookups and removals report it with `bool` or
/// `Option`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} is out of range for a set of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to allocate a new node")]
    AllocationFailure,

    #[error("failed to insert a unique key")]
    InsertionFailed,

    #[error("replacing the key would break the ordering of the set")]
    OrderViolation,

    #[error("the cursor does not point at a key")]
    CursorAtEnd,
}

pub type Result<T> = result::Result<T, Error>;
