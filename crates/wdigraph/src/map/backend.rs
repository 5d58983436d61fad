//! Pluggable storage for [`MapDigraph`](super::MapDigraph).
//!
//! A [`MapBackend`] creates the outer vertex map and the per-source edge maps. Iteration order
//! of the graph is exactly the iteration order of these maps.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Ordering used by comparator-backed maps.
pub type Comparator<V> = Arc<dyn Fn(&V, &V) -> Ordering + Send + Sync>;

/// Minimal ordered map interface required by `MapDigraph`.
pub trait AdjacencyMap<K, T> {
    fn get(&self, key: &K) -> Option<&T>;

    fn get_mut(&mut self, key: &K) -> Option<&mut T>;

    fn insert(&mut self, key: K, value: T) -> Option<T>;

    /// Removes `key`, keeping the relative order of the remaining entries.
    fn remove(&mut self, key: &K) -> Option<T>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a T)>
    where
        K: 'a,
        T: 'a;

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut T)>
    where
        K: 'a,
        T: 'a;

    fn retain(&mut self, keep: impl FnMut(&K, &mut T) -> bool);

    fn first_key(&self) -> Option<&K>;

    /// The key following `key`, or `None` if `key` is last or absent.
    fn key_after(&self, key: &K) -> Option<&K>;
}

/// Strategy producing the two map layers of a `MapDigraph`.
///
/// The outer map stores `None` for vertices without outgoing edges; edge maps are only created
/// for the first outgoing edge of a source.
pub trait MapBackend<V>: Clone {
    type EdgeMap: AdjacencyMap<V, i32>;
    type VertexMap: AdjacencyMap<V, Option<Self::EdgeMap>>;

    fn vertex_map(&self) -> Self::VertexMap;

    fn edge_map(&self, source: &V) -> Self::EdgeMap;
}

type FxIndexMap<K, T> = IndexMap<K, T, FxBuildHasher>;

impl<K, T> AdjacencyMap<K, T> for FxIndexMap<K, T>
where
    K: Hash + Eq,
{
    fn get(&self, key: &K) -> Option<&T> {
        IndexMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        IndexMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: T) -> Option<T> {
        IndexMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<T> {
        self.shift_remove(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        IndexMap::contains_key(self, key)
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a T)>
    where
        K: 'a,
        T: 'a,
    {
        IndexMap::iter(self)
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut T)>
    where
        K: 'a,
        T: 'a,
    {
        IndexMap::iter_mut(self)
    }

    fn retain(&mut self, keep: impl FnMut(&K, &mut T) -> bool) {
        IndexMap::retain(self, keep);
    }

    fn first_key(&self) -> Option<&K> {
        self.get_index(0).map(|(k, _)| k)
    }

    fn key_after(&self, key: &K) -> Option<&K> {
        let ix = self.get_index_of(key)?;
        self.get_index(ix + 1).map(|(k, _)| k)
    }
}

/// Insertion-ordered hash maps (the default backend).
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionOrder;

impl<V> MapBackend<V> for InsertionOrder
where
    V: Hash + Eq,
{
    type EdgeMap = FxIndexMap<V, i32>;
    type VertexMap = FxIndexMap<V, Option<Self::EdgeMap>>;

    fn vertex_map(&self) -> Self::VertexMap {
        IndexMap::default()
    }

    fn edge_map(&self, _source: &V) -> Self::EdgeMap {
        IndexMap::default()
    }
}

/// Sorted vector map ordered by a runtime comparator.
pub struct SortedMap<K, T> {
    entries: Vec<(K, T)>,
    cmp: Comparator<K>,
}

impl<K, T> SortedMap<K, T> {
    pub fn new(cmp: Comparator<K>) -> Self {
        Self {
            entries: Vec::new(),
            cmp,
        }
    }

    fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| (self.cmp)(k, key))
    }
}

impl<K: Clone, T: Clone> Clone for SortedMap<K, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            cmp: Arc::clone(&self.cmp),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for SortedMap<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, T> AdjacencyMap<K, T> for SortedMap<K, T> {
    fn get(&self, key: &K) -> Option<&T> {
        let ix = self.search(key).ok()?;
        Some(&self.entries[ix].1)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        let ix = self.search(key).ok()?;
        Some(&mut self.entries[ix].1)
    }

    fn insert(&mut self, key: K, value: T) -> Option<T> {
        match self.search(&key) {
            Ok(ix) => Some(std::mem::replace(&mut self.entries[ix].1, value)),
            Err(ix) => {
                self.entries.insert(ix, (key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<T> {
        let ix = self.search(key).ok()?;
        Some(self.entries.remove(ix).1)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a T)>
    where
        K: 'a,
        T: 'a,
    {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (&'a K, &'a mut T)>
    where
        K: 'a,
        T: 'a,
    {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    fn retain(&mut self, mut keep: impl FnMut(&K, &mut T) -> bool) {
        self.entries.retain_mut(|(k, v)| keep(k, v));
    }

    fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    fn key_after(&self, key: &K) -> Option<&K> {
        let ix = self.search(key).ok()?;
        self.entries.get(ix + 1).map(|(k, _)| k)
    }
}

/// Comparator-ordered maps: vertices and edge targets iterate in sorted order.
///
/// Lookups are `O(log n)`, but inserts and removals shift a sorted `Vec` and cost `O(n)`, so
/// building a graph of `n` vertices one at a time is `O(n^2)`. Use [`InsertionOrder`] for large
/// graphs that do not need sorted traversal.
pub struct ComparatorOrder<V> {
    vertex_cmp: Comparator<V>,
    edge_cmp: Comparator<V>,
}

impl<V> ComparatorOrder<V> {
    pub fn new(cmp: Comparator<V>) -> Self {
        Self {
            vertex_cmp: Arc::clone(&cmp),
            edge_cmp: cmp,
        }
    }

    /// Separate orders for the vertex sequence and for each target sequence.
    pub fn with_edge_order(vertex_cmp: Comparator<V>, edge_cmp: Comparator<V>) -> Self {
        Self {
            vertex_cmp,
            edge_cmp,
        }
    }
}

impl<V> Clone for ComparatorOrder<V> {
    fn clone(&self) -> Self {
        Self {
            vertex_cmp: Arc::clone(&self.vertex_cmp),
            edge_cmp: Arc::clone(&self.edge_cmp),
        }
    }
}

impl<V> fmt::Debug for ComparatorOrder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorOrder").finish_non_exhaustive()
    }
}

impl<V> MapBackend<V> for ComparatorOrder<V> {
    type EdgeMap = SortedMap<V, i32>;
    type VertexMap = SortedMap<V, Option<Self::EdgeMap>>;

    fn vertex_map(&self) -> Self::VertexMap {
        SortedMap::new(Arc::clone(&self.vertex_cmp))
    }

    fn edge_map(&self, _source: &V) -> Self::EdgeMap {
        SortedMap::new(Arc::clone(&self.edge_cmp))
    }
}
