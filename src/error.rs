//! Error types returned by fallible `ChainTable` operations.
//!
//! Absence of a key is never an error: lookups and removals report it
//! through `Option`/`bool`.

use thiserror::Error;

/// Returned by `ChainTable::insert` when the key is already present.
/// Stored entries and `len()` are unchanged; the growth check that runs
/// before the duplicate scan may still have doubled the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("duplicate key not allowed")]
    DuplicateKey,
}

/// Returned by the capacity-taking constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("initial capacity must be at least one bucket")]
    Zero,
}
