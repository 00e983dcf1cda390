//! Weighted union-find forest over arbitrary hashable keys.
//!
//! Keys are interned in an insertion-ordered set; a key's position in that set
//! is its node index and parent links are stored as node indices. Keys are
//! never removed, so node indices stay valid for the lifetime of the forest.
//!
//! Lookups that resolve a root compress the traversed path: after the root is
//! found, every visited node is re-pointed directly at it. Unions attach the
//! lighter set beneath the heavier root and add the absorbed weight to the
//! survivor, which bounds tree depth by `log2(n)` even before compression.

mod iter;

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument, trace};

use crate::error::{ForestError, InvariantViolation, Result};
use crate::invariants;

pub use self::iter::{Entries, EntryRef, Keys, Roots};

/// Mapping from each root to the keys of its set, the root included.
///
/// Both levels preserve the order in which keys were inserted into the
/// forest. Callers should still treat the ordering as presentational.
pub type RootGroups<K> = IndexMap<K, IndexSet<K>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) parent: usize,
    /// Number of keys in the set; only meaningful while the node is a root.
    pub(crate) weight: usize,
}

impl Node {
    const fn singleton(index: usize) -> Self {
        Self {
            parent: index,
            weight: 1,
        }
    }
}

/// Disjoint-set forest partitioning inserted keys into disjoint sets.
///
/// Methods that resolve roots ([`Forest::find_root`], [`Forest::union`],
/// [`Forest::connected`], [`Forest::set_size`] and [`Forest::group_by_root`])
/// take `&mut self` because they compress paths as a side effect. Observable
/// set membership never changes through compression; only the internal tree
/// shape does. Share a forest across threads by wrapping the whole structure
/// in a single [`std::sync::Mutex`].
///
/// # Examples
/// ```
/// use wuf_core::Forest;
///
/// let mut forest: Forest<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
/// assert!(forest.union("a", "b")?);
/// assert!(forest.connected("a", "b")?);
/// assert!(!forest.connected("a", "c")?);
/// assert_eq!(forest.set_count(), 2);
/// # Ok::<(), wuf_core::ForestError<String>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Forest<K> {
    keys: IndexSet<K>,
    nodes: Vec<Node>,
    sets: usize,
}

impl<K> Default for Forest<K> {
    fn default() -> Self {
        Self {
            keys: IndexSet::new(),
            nodes: Vec::new(),
            sets: 0,
        }
    }
}

impl<K> Forest<K> {
    /// Creates an empty forest.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let forest: Forest<u32> = Forest::new();
    /// assert!(forest.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty forest with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: IndexSet::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Returns the number of inserted keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no key has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of disjoint sets currently in the forest.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest: Forest<u32> = (0..4).collect();
    /// forest.union(&0, &1)?;
    /// assert_eq!(forest.set_count(), 3);
    /// # Ok::<(), wuf_core::ForestError<u32>>(())
    /// ```
    #[must_use]
    pub const fn set_count(&self) -> usize {
        self.sets
    }

    /// Iterates over every inserted key in insertion order.
    ///
    /// The iterator is lazy and never mutates the forest; calling `iter` again
    /// restarts from the first key.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let forest: Forest<char> = "cab".chars().collect();
    /// assert_eq!(forest.iter().copied().collect::<String>(), "cab");
    /// ```
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K> {
        Keys::new(self.keys.iter())
    }

    /// Iterates over the stored `(key, parent, weight)` entries in insertion
    /// order without resolving or compressing anything.
    ///
    /// Only a root's weight is meaningful; non-root entries carry the weight
    /// they had when they were last a root. Feeding the entries back into
    /// [`Forest::try_from_entries`] reproduces the forest.
    #[must_use]
    pub fn entries(&self) -> Entries<'_, K> {
        Entries::new(&self.keys, &self.nodes)
    }

    /// Iterates over the keys that are currently roots.
    #[must_use]
    pub fn roots(&self) -> Roots<'_, K> {
        Roots::new(self.entries())
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "node indices come from the interned key set"
    )]
    pub(crate) fn key_at(&self, index: usize) -> &K {
        &self.keys[index]
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "node indices come from the interned key set"
    )]
    fn find_index(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }

        let mut current = node;
        while self.nodes[current].parent != current {
            let parent = self.nodes[current].parent;
            self.nodes[current].parent = root;
            current = parent;
        }

        root
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "both roots were resolved by `find_index`"
    )]
    fn merge_roots(&mut self, p_root: usize, q_root: usize) {
        let p_weight = self.nodes[p_root].weight;
        let q_weight = self.nodes[q_root].weight;
        let (survivor, absorbed) = choose_survivor(p_root, q_root, p_weight, q_weight);
        let absorbed_weight = self.nodes[absorbed].weight;

        self.nodes[absorbed].parent = survivor;
        self.nodes[survivor].weight += absorbed_weight;
        self.sets -= 1;

        trace!(
            survivor_weight = self.nodes[survivor].weight,
            absorbed_weight,
            sets = self.sets,
            "merged sets"
        );
    }
}

impl<K: Eq + Hash> Forest<K> {
    /// Returns `true` when `key` has been inserted.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys.contains(key)
    }

    /// Inserts `key` as a new singleton set of weight 1.
    ///
    /// Returns `false` and leaves the forest untouched when `key` is already
    /// present.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest = Forest::new();
    /// assert!(forest.insert("a"));
    /// assert!(!forest.insert("a"));
    /// assert_eq!(forest.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let index = self.nodes.len();
        if !self.keys.insert(key) {
            return false;
        }
        self.nodes.push(Node::singleton(index));
        self.sets += 1;
        true
    }

    fn index_of<Q>(&self, key: &Q) -> Result<usize, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.keys
            .get_index_of(key)
            .ok_or_else(|| ForestError::KeyNotFound {
                key: key.to_owned(),
            })
    }

    /// Resolves the root of the set containing `key`.
    ///
    /// Every node visited on the way is re-pointed directly at the root, so
    /// this lookup mutates the internal tree shape even though the result
    /// only reads membership.
    ///
    /// # Errors
    /// Returns [`ForestError::KeyNotFound`] when `key` was never inserted. The
    /// forest is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::{Forest, ForestError};
    ///
    /// let mut forest: Forest<String> = ["x", "y"].into_iter().map(String::from).collect();
    /// forest.union("x", "y")?;
    /// assert_eq!(forest.find_root("y")?, "x");
    /// assert!(matches!(
    ///     forest.find_root("z"),
    ///     Err(ForestError::KeyNotFound { .. })
    /// ));
    /// # Ok::<(), ForestError<String>>(())
    /// ```
    pub fn find_root<Q>(&mut self, key: &Q) -> Result<K, K>
    where
        K: Borrow<Q> + Clone,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let node = self.index_of(key)?;
        let root = self.find_index(node);
        Ok(self.key_at(root).clone())
    }

    /// Merges the sets containing `p` and `q`.
    ///
    /// The root of the lighter set is attached beneath the root of the heavier
    /// one; on equal weights `p`'s root survives. The survivor's weight grows
    /// by the absorbed weight in every case.
    ///
    /// Returns `true` when two distinct sets were merged and `false` when `p`
    /// and `q` were already connected, which is the signal that an edge
    /// between them would close a cycle.
    ///
    /// # Errors
    /// Returns [`ForestError::KeyNotFound`] when either key was never
    /// inserted. Both keys are looked up before any parent link changes.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest: Forest<u8> = (0..3).collect();
    /// assert!(forest.union(&0, &1)?);
    /// assert!(forest.union(&1, &2)?);
    /// assert!(!forest.union(&2, &0)?);
    /// assert_eq!(forest.set_size(&2)?, 3);
    /// # Ok::<(), wuf_core::ForestError<u8>>(())
    /// ```
    pub fn union<Q>(&mut self, p: &Q, q: &Q) -> Result<bool, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let p_node = self.index_of(p)?;
        let q_node = self.index_of(q)?;

        let p_root = self.find_index(p_node);
        let q_root = self.find_index(q_node);
        if p_root == q_root {
            return Ok(false);
        }

        self.merge_roots(p_root, q_root);
        Ok(true)
    }

    /// Returns `true` when `p` and `q` belong to the same set.
    ///
    /// # Errors
    /// Returns [`ForestError::KeyNotFound`] when either key was never
    /// inserted.
    pub fn connected<Q>(&mut self, p: &Q, q: &Q) -> Result<bool, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let p_node = self.index_of(p)?;
        let q_node = self.index_of(q)?;
        Ok(self.find_index(p_node) == self.find_index(q_node))
    }

    /// Returns the number of keys in the set containing `key`.
    ///
    /// # Errors
    /// Returns [`ForestError::KeyNotFound`] when `key` was never inserted.
    #[expect(
        clippy::indexing_slicing,
        reason = "node indices come from the interned key set"
    )]
    pub fn set_size<Q>(&mut self, key: &Q) -> Result<usize, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let node = self.index_of(key)?;
        let root = self.find_index(node);
        Ok(self.nodes[root].weight)
    }

    /// Counts the parent hops between `key` and its root without compressing.
    ///
    /// Roots have depth zero.
    ///
    /// # Errors
    /// Returns [`ForestError::KeyNotFound`] when `key` was never inserted.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest: Forest<u8> = (0..2).collect();
    /// forest.union(&0, &1)?;
    /// assert_eq!(forest.depth(&0)?, 0);
    /// assert_eq!(forest.depth(&1)?, 1);
    /// # Ok::<(), wuf_core::ForestError<u8>>(())
    /// ```
    #[expect(
        clippy::indexing_slicing,
        reason = "node indices come from the interned key set"
    )]
    pub fn depth<Q>(&self, key: &Q) -> Result<usize, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let mut current = self.index_of(key)?;
        let mut hops = 0;
        while self.nodes[current].parent != current {
            current = self.nodes[current].parent;
            hops += 1;
        }
        Ok(hops)
    }

    /// Groups every key under the root of its set.
    ///
    /// Resolves the root of every key, which fully compresses every path as a
    /// side effect. Each key appears in exactly one group, and the groups
    /// together cover every inserted key.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest: Forest<u8> = (0..4).collect();
    /// forest.union(&0, &1)?;
    /// forest.union(&2, &3)?;
    /// let groups = forest.group_by_root();
    /// assert_eq!(groups.len(), 2);
    /// assert!(groups.values().all(|members| members.len() == 2));
    /// # Ok::<(), wuf_core::ForestError<u8>>(())
    /// ```
    #[instrument(
        name = "core.group_by_root",
        level = "debug",
        skip(self),
        fields(keys = self.len(), sets = self.sets),
    )]
    pub fn group_by_root(&mut self) -> RootGroups<K>
    where
        K: Clone,
    {
        let mut groups: RootGroups<K> = IndexMap::with_capacity(self.sets);
        for node in 0..self.nodes.len() {
            let root = self.find_index(node);
            groups
                .entry(self.key_at(root).clone())
                .or_default()
                .insert(self.key_at(node).clone());
        }
        groups
    }

    /// Verifies that every key reaches a root and that each root's weight
    /// matches the size of its set.
    ///
    /// Runs without compressing paths.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] encountered.
    pub fn check_invariants(&self) -> core::result::Result<(), InvariantViolation<K>>
    where
        K: Clone,
    {
        invariants::check(self)
    }

    /// Seeds a forest from an external `key → (parent, weight)` mapping, such
    /// as a snapshot previously produced by [`Forest::entries`].
    ///
    /// Weights are read only for roots. The seeded forest is validated with
    /// [`Forest::check_invariants`] before it is returned.
    ///
    /// # Errors
    /// Returns [`InvariantViolation::DuplicateKey`] when a key repeats,
    /// [`InvariantViolation::DanglingParent`] when a parent is not itself an
    /// entry, [`InvariantViolation::Cycle`] when parent links never reach a
    /// root, and [`InvariantViolation::WeightMismatch`] when a root's weight
    /// disagrees with its set size.
    ///
    /// # Examples
    /// ```
    /// use wuf_core::Forest;
    ///
    /// let mut forest = Forest::try_from_entries([
    ///     ("a", ("a", 2)),
    ///     ("b", ("a", 1)),
    ///     ("c", ("c", 1)),
    /// ])?;
    /// assert_eq!(forest.set_count(), 2);
    /// assert_eq!(forest.find_root(&"b").ok(), Some("a"));
    /// # Ok::<(), wuf_core::InvariantViolation<&str>>(())
    /// ```
    #[instrument(
        name = "core.try_from_entries",
        level = "debug",
        skip(entries),
        err(Debug),
    )]
    pub fn try_from_entries<I>(entries: I) -> core::result::Result<Self, InvariantViolation<K>>
    where
        I: IntoIterator<Item = (K, (K, usize))>,
        K: Clone + std::fmt::Debug,
    {
        let source = entries.into_iter();
        let (capacity, _) = source.size_hint();
        let mut keys = IndexSet::with_capacity(capacity);
        let mut links = Vec::with_capacity(capacity);
        for (key, link) in source {
            if keys.contains(&key) {
                return Err(InvariantViolation::DuplicateKey { key });
            }
            keys.insert(key);
            links.push(link);
        }

        let mut nodes = Vec::with_capacity(links.len());
        for (key, (parent, weight)) in keys.iter().zip(links) {
            let Some(parent_index) = keys.get_index_of(&parent) else {
                return Err(InvariantViolation::DanglingParent {
                    key: key.clone(),
                    parent,
                });
            };
            nodes.push(Node {
                parent: parent_index,
                weight,
            });
        }

        let sets = nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| node.parent == *index)
            .count();
        let forest = Self { keys, nodes, sets };
        forest.check_invariants()?;

        debug!(keys = forest.len(), sets = forest.sets, "seeded forest");
        Ok(forest)
    }
}

impl<K: Eq + Hash> Extend<K> for Forest<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Eq + Hash> FromIterator<K> for Forest<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut forest = Self::new();
        forest.extend(keys);
        forest
    }
}

impl<'a, K> IntoIterator for &'a Forest<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Picks `(survivor, absorbed)` for two distinct roots: the heavier root
/// survives, and `p_root` wins ties.
const fn choose_survivor(
    p_root: usize,
    q_root: usize,
    p_weight: usize,
    q_weight: usize,
) -> (usize, usize) {
    if q_weight > p_weight {
        (q_root, p_root)
    } else {
        (p_root, q_root)
    }
}

#[cfg(test)]
mod property;
