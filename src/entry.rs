//! Entry: one key/value pair as stored by `ChainTable`.

use core::fmt;

/// A stored key/value pair, handed out by `ChainTable::find` and
/// `ChainTable::find_mut`.
///
/// The key is immutable once inserted; only the value can be changed in
/// place. A `&mut Entry` borrows the table mutably, so it cannot be held
/// across an insertion that might grow the table.
#[derive(Clone)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Computed once at insertion; rehashing reuses it.
    pub(crate) hash: u64,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64) -> Self {
        Self { key, value, hash }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Overwrites the value, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
