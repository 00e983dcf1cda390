//! Read-only iterators over a [`Forest`](super::Forest).

use std::iter::{Enumerate, FusedIterator};
use std::slice;

use indexmap::IndexSet;
use indexmap::set::Iter;

use super::Node;

/// Iterator over the keys of a forest in insertion order.
///
/// Created by [`Forest::iter`](super::Forest::iter).
#[derive(Debug)]
pub struct Keys<'a, K> {
    inner: Iter<'a, K>,
}

impl<'a, K> Keys<'a, K> {
    pub(super) const fn new(inner: Iter<'a, K>) -> Self {
        Self { inner }
    }
}

impl<K> Clone for Keys<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

impl<K> FusedIterator for Keys<'_, K> {}

/// Borrowed view of one stored forest entry.
#[derive(Debug, PartialEq, Eq)]
pub struct EntryRef<'a, K> {
    key: &'a K,
    parent: &'a K,
    weight: usize,
    root: bool,
}

impl<K> Clone for EntryRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for EntryRef<'_, K> {}

impl<'a, K> EntryRef<'a, K> {
    /// The entry's key.
    #[must_use]
    pub const fn key(&self) -> &'a K {
        self.key
    }

    /// The key this entry's parent link points at. Equal to [`Self::key`] for
    /// roots.
    #[must_use]
    pub const fn parent(&self) -> &'a K {
        self.parent
    }

    /// The stored weight. Only meaningful when [`Self::is_root`] holds.
    #[must_use]
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Returns `true` when the entry is the root of its set.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.root
    }
}

/// Iterator over the stored entries of a forest in insertion order.
///
/// Created by [`Forest::entries`](super::Forest::entries).
#[derive(Debug)]
pub struct Entries<'a, K> {
    keys: &'a IndexSet<K>,
    nodes: Enumerate<slice::Iter<'a, Node>>,
}

impl<'a, K> Entries<'a, K> {
    pub(super) fn new(keys: &'a IndexSet<K>, nodes: &'a [Node]) -> Self {
        Self {
            keys,
            nodes: nodes.iter().enumerate(),
        }
    }
}

impl<K> Clone for Entries<'_, K> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys,
            nodes: self.nodes.clone(),
        }
    }
}

impl<'a, K> Iterator for Entries<'a, K> {
    type Item = EntryRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, node) = self.nodes.next()?;
        let keys = self.keys;
        Some(EntryRef {
            key: &keys[index],
            parent: &keys[node.parent],
            weight: node.weight,
            root: node.parent == index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<K> ExactSizeIterator for Entries<'_, K> {}

impl<K> FusedIterator for Entries<'_, K> {}

/// Iterator over the current roots of a forest in insertion order.
///
/// Created by [`Forest::roots`](super::Forest::roots).
#[derive(Debug)]
pub struct Roots<'a, K> {
    entries: Entries<'a, K>,
}

impl<'a, K> Roots<'a, K> {
    pub(super) const fn new(entries: Entries<'a, K>) -> Self {
        Self { entries }
    }
}

impl<'a, K> Iterator for Roots<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .by_ref()
            .find(EntryRef::is_root)
            .map(|entry| entry.key)
    }
}

impl<K> FusedIterator for Roots<'_, K> {}
