//! chain-table: a single-threaded hash table that resolves collisions by
//! separate chaining, with insertion-ordered chains and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainTable<K, V, S>` owns three things: a `BuildHasher`, a bucket
//!   array (`Vec<Vec<DefaultKey>>`, its length is the capacity), and a
//!   `SlotMap` holding the entries themselves.
//! - A key's bucket is `hash(key) % capacity`; the chain in that bucket is
//!   scanned linearly and resolved with `K: Eq`.
//! - Before a new entry is added the table checks the prospective load
//!   factor `(len + 1) / capacity` against 0.75 and doubles the bucket
//!   array when it would be exceeded.
//!
//! Constraints
//! - Single-threaded: no internal locking. Mutation requires `&mut self`;
//!   wrap the table in a mutex to share it.
//! - Unique keys: `insert` rejects duplicates with
//!   `InsertError::DuplicateKey`; `insert_or_replace` overwrites in place.
//! - Not-found is reported with `Option`/`bool`, never as an error.
//! - Capacity never shrinks on removal. `clear()` is the one exception and
//!   always resets to `DEFAULT_CAPACITY`, regardless of the capacity the
//!   table was built with.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its `u64` hash computed at insertion. Growth
//!   re-buckets slot ids using the stored hash, so `K: Hash` is never
//!   invoked after insertion and a rehash never calls into user code.
//! - Hashes are unsigned, so the bucket index is non-negative by
//!   construction.
//! - Growth moves ids between chains; entries stay in their storage slot.
//!   Relative order within each new chain follows the old traversal order.
//!
//! Iteration
//! - All iterators visit buckets in index order and each chain in
//!   insertion order. Overall order therefore depends on hashes, not on
//!   global insertion order.
//! - Borrowing iterators keep the table borrowed; collect them to obtain a
//!   snapshot that outlives later mutation.
//!
//! Notes and non-goals
//! - No open addressing, no shrink policy, no custom allocators.
//! - The default hasher (`hashbrown`'s `DefaultHashBuilder`) is fast and
//!   deterministic per table, not collision-resistant against adversarial
//!   input; pass a different `BuildHasher` via `with_hasher` if needed.
//! - Keys are immutable post-insert; there is no `key_mut`.
//! - Growth is logged at `debug` level through the `log` facade.

mod chain_table;
mod chain_table_proptest;
mod entry;
mod error;
pub mod iter;

// Public surface
pub use chain_table::{ChainTable, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
pub use entry::Entry;
pub use error::{CapacityError, InsertError};
