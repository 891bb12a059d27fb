//! Iterators over `ChainTable`.
//!
//! Every iterator walks buckets in index order and each chain in insertion
//! order. Borrowing iterators hold the table borrowed for their whole
//! lifetime, so a traversal always sees one consistent state.

use crate::chain_table::{Chain, ChainTable, Slots};
use crate::entry::Entry;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SecondaryMap};

/// Iterator over `(&K, &V)` pairs.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain>,
    chain: core::slice::Iter<'a, DefaultKey>,
    slots: &'a Slots<K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Chain], slots: &'a Slots<K, V>) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: Default::default(),
            slots,
            remaining: slots.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&id) = self.chain.next() {
                if let Some(e) = self.slots.get(id) {
                    self.remaining -= 1;
                    return Some((&e.key, &e.value));
                }
                continue;
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            slots: self.slots,
            remaining: self.remaining,
        }
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` pairs.
///
/// Storage order and chain order differ, so construction gathers one
/// mutable reference per live entry into a `SecondaryMap` and hands them
/// out in chain order. Each call therefore allocates O(storage slots).
pub struct IterMut<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain>,
    chain: core::slice::Iter<'a, DefaultKey>,
    pending: SecondaryMap<DefaultKey, &'a mut Entry<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Chain], slots: &'a mut Slots<K, V>) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: Default::default(),
            pending: slots.iter_mut().collect(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&id) = self.chain.next() {
                if let Some(e) = self.pending.remove(id) {
                    return Some((&e.key, &mut e.value));
                }
                continue;
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` pairs.
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Chain>,
    chain: std::vec::IntoIter<DefaultKey>,
    slots: Slots<K, V>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(buckets: Vec<Chain>, slots: Slots<K, V>) -> Self {
        Self {
            buckets: buckets.into_iter(),
            chain: Vec::new().into_iter(),
            slots,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.chain.next() {
                if let Some(e) = self.slots.remove(id) {
                    return Some(e.into_pair());
                }
                continue;
            }
            self.chain = self.buckets.next()?.into_iter();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.slots.len(), Some(self.slots.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over keys, in traversal order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values, in the same order as `Keys`.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over mutable values, in the same order as `Keys`.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ChainTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for ChainTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let (buckets, slots) = self.into_parts();
        IntoIter::new(buckets, slots)
    }
}
