//! ChainTable: separate-chaining hash table over generational entry storage.

use crate::entry::Entry;
use crate::error::{CapacityError, InsertError};
use crate::iter::{Iter, IterMut, Keys, Values, ValuesMut};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

/// Bucket count of a table built by `new()` and of every table after
/// `clear()`.
pub const DEFAULT_CAPACITY: usize = 16;

/// Growth threshold on `len / capacity`, checked against the prospective
/// length before each new entry is added.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// One bucket: ids of the entries hashing to it, in insertion order.
pub(crate) type Chain = Vec<DefaultKey>;
pub(crate) type Slots<K, V> = SlotMap<DefaultKey, Entry<K, V>>;

/// A hash table resolving collisions by separate chaining.
///
/// Entries live in a `SlotMap`; each bucket is a chain of slot ids. Growth
/// doubles the bucket array and re-buckets ids, so entries are never moved
/// or rebuilt by a rehash.
#[derive(Clone)]
pub struct ChainTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Chain>, // len() is the capacity, never zero
    slots: Slots<K, V>,
}

fn empty_buckets(capacity: usize) -> Vec<Chain> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

#[inline]
fn slot_for(hash: u64, capacity: usize) -> usize {
    // Unsigned modulo: never negative, always < capacity.
    (hash % capacity as u64) as usize
}

impl<K, V> ChainTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, S> Default for ChainTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(DEFAULT_CAPACITY),
            slots: SlotMap::with_key(),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self {
            hasher,
            buckets: empty_buckets(capacity),
            slots: SlotMap::with_key(),
        })
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Drops every entry and resets the bucket array to `DEFAULT_CAPACITY`,
    /// whatever capacity the table was built with or has grown to. The
    /// hasher is kept.
    pub fn clear(&mut self) {
        trace!(
            "clearing chain table: {} entries, {} buckets",
            self.len(),
            self.capacity()
        );
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.slots.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, &self.slots)
    }

    /// Mutable traversal in the same order as `iter`. Unlike `iter`, each
    /// call allocates a lookup sized to the entry storage.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&self.buckets, &mut self.slots)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Chain>, Slots<K, V>) {
        (self.buckets, self.slots)
    }
}

impl<K, V, S> ChainTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Bucket index and chain position of the entry equal to `q`.
    fn locate<Q>(&self, hash: u64, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let slot = slot_for(hash, self.capacity());
        self.buckets[slot]
            .iter()
            .position(|&id| {
                self.slots
                    .get(id)
                    .map(|e| e.hash == hash && e.key.borrow() == q)
                    .unwrap_or(false)
            })
            .map(|pos| (slot, pos))
    }

    fn lookup<Q>(&self, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let (slot, pos) = self.locate(hash, q)?;
        Some(self.buckets[slot][pos])
    }

    /// Adds a new entry, failing with `DuplicateKey` if `key` is present.
    ///
    /// The growth check comes first: the table grows when `(len + 1) /
    /// capacity` would exceed `MAX_LOAD_FACTOR`, even if the key then turns
    /// out to be a duplicate. The chain is scanned under the resulting
    /// capacity and the entry appended to it.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), InsertError> {
        self.grow_if_needed();
        let hash = self.make_hash(&key);
        if self.locate(hash, &key).is_some() {
            return Err(InsertError::DuplicateKey);
        }
        self.place(Entry::new(key, value, hash));
        Ok(())
    }

    /// Overwrites the value of an existing key in place, or inserts a new
    /// entry. Returns `true` when a value was replaced.
    ///
    /// The lookup uses the current capacity; only a miss runs the growth
    /// check, in the same order as `insert`.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> bool {
        let hash = self.make_hash(&key);
        if let Some((slot, pos)) = self.locate(hash, &key) {
            let id = self.buckets[slot][pos];
            if let Some(entry) = self.slots.get_mut(id) {
                entry.value = value;
                return true;
            }
        }
        self.grow_if_needed();
        self.place(Entry::new(key, value, hash));
        false
    }

    // Caller has run the growth check and ruled out a duplicate.
    fn place(&mut self, entry: Entry<K, V>) {
        let slot = slot_for(entry.hash, self.capacity());
        let id = self.slots.insert(entry);
        self.buckets[slot].push(id);
    }

    fn grow_if_needed(&mut self) {
        let prospective = (self.len() + 1) as f64 / self.capacity() as f64;
        if prospective > MAX_LOAD_FACTOR {
            self.grow();
        }
    }

    /// Doubles the bucket array and re-buckets every id under the new
    /// capacity, visiting old buckets in index order and chains in order.
    /// Uses stored hashes only; no user code runs while the arrays are
    /// being swapped.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let mut buckets = empty_buckets(new_capacity);
        for id in self.buckets.drain(..).flatten() {
            if let Some(entry) = self.slots.get(id) {
                buckets[slot_for(entry.hash, new_capacity)].push(id);
            }
        }
        self.buckets = buckets;
        debug!(
            "chain table grew from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.len()
        );
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).map(Entry::value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_mut(q).map(Entry::value_mut)
    }

    /// The stored entry for `q`, exposing both key and value.
    pub fn find<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(q)?;
        self.slots.get(id)
    }

    /// Mutable access to the stored entry for `q`. The returned borrow
    /// must end before the next insertion, which may rehash.
    pub fn find_mut<Q>(&mut self, q: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.lookup(q)?;
        self.slots.get_mut(id)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lookup(q).is_some()
    }

    /// Removes `q`, returning whether it was present. Capacity is never
    /// reduced.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).is_some()
    }

    /// Removes `q` and hands back the owned pair. The chain is unlinked
    /// before the pair is returned, so dropping it may reenter the table.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let (slot, pos) = self.locate(hash, q)?;
        let id = self.buckets[slot].remove(pos);
        self.slots.remove(id).map(Entry::into_pair)
    }
}

impl<K, V, S> fmt::Debug for ChainTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChainTable<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainTable<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for ChainTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Later pairs win over earlier ones and over existing entries.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_or_replace(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

#[cfg(test)]
impl<K, V, S> ChainTable<K, V, S> {
    /// Panics unless chain lengths sum to `len()` and every chained id
    /// resolves to an entry whose stored hash maps back to its bucket.
    pub(crate) fn assert_consistent(&self) {
        let chained: usize = self.buckets.iter().map(Vec::len).sum();
        assert_eq!(chained, self.len());
        for (slot, chain) in self.buckets.iter().enumerate() {
            for &id in chain {
                let e = self.slots.get(id).expect("chained id must be live");
                assert_eq!(slot_for(e.hash, self.capacity()), slot);
            }
        }
    }
}
