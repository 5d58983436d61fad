//! General-purpose map-backed digraph.
//!
//! Storage is a vertex map whose values are per-source edge maps (target to weight). Vertices
//! without outgoing edges hold no edge map at all; one is created on the first outgoing edge
//! and dropped again when the last one is removed.

mod backend;

pub use backend::{
    AdjacencyMap, Comparator, ComparatorOrder, InsertionOrder, MapBackend, SortedMap,
};

use crate::digraph::{Digraph, VertexSet};
use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

const DISPLAY_LIMIT: usize = 1000;

pub struct MapDigraph<V, B = InsertionOrder>
where
    B: MapBackend<V>,
{
    backend: B,
    vertex_map: B::VertexMap,
    // Running total; always equals the sum of the edge map sizes.
    edge_count: usize,
}

impl<V> MapDigraph<V>
where
    V: Clone + Eq + Hash,
{
    /// Empty graph iterating vertices and targets in insertion order.
    pub fn new() -> Self {
        Self::with_backend(InsertionOrder)
    }

    pub fn factory() -> fn() -> Self {
        Self::new
    }
}

impl<V> Default for MapDigraph<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MapDigraph<V, ComparatorOrder<V>>
where
    V: Clone + Eq + Hash + 'static,
{
    /// Empty graph iterating vertices and targets in `cmp` order.
    pub fn with_comparator<F>(cmp: F) -> Self
    where
        F: Fn(&V, &V) -> Ordering + Send + Sync + 'static,
    {
        Self::with_backend(ComparatorOrder::new(Arc::new(cmp)))
    }

    /// Empty graph with one order for the vertex sequence and another for target sequences.
    pub fn with_comparators<F, G>(vertex_cmp: F, edge_cmp: G) -> Self
    where
        F: Fn(&V, &V) -> Ordering + Send + Sync + 'static,
        G: Fn(&V, &V) -> Ordering + Send + Sync + 'static,
    {
        Self::with_backend(ComparatorOrder::with_edge_order(
            Arc::new(vertex_cmp),
            Arc::new(edge_cmp),
        ))
    }
}

impl<V> MapDigraph<V, ComparatorOrder<V>>
where
    V: Clone + Ord + Hash + 'static,
{
    /// Empty graph iterating in the natural order of `V`.
    pub fn sorted() -> Self {
        Self::with_comparator(V::cmp)
    }
}

impl<V, B> MapDigraph<V, B>
where
    V: Clone + Eq + Hash,
    B: MapBackend<V>,
{
    pub fn with_backend(backend: B) -> Self {
        let vertex_map = backend.vertex_map();
        Self {
            backend,
            vertex_map,
            edge_count: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Factory for empty graphs sharing this graph's backend configuration.
    pub fn digraph_factory(&self) -> impl Fn() -> Self + use<V, B> {
        let backend = self.backend.clone();
        move || Self::with_backend(backend.clone())
    }

    fn insert_vertex(&mut self, vertex: V) -> bool {
        if self.vertex_map.contains_key(&vertex) {
            return false;
        }
        self.vertex_map.insert(vertex, None);
        true
    }

    fn edges_of(&self, source: &V) -> Option<&B::EdgeMap> {
        self.vertex_map.get(source)?.as_ref()
    }
}

impl<V, B> Clone for MapDigraph<V, B>
where
    B: MapBackend<V>,
    B::VertexMap: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            vertex_map: self.vertex_map.clone(),
            edge_count: self.edge_count,
        }
    }
}

impl<V, B> Digraph<V> for MapDigraph<V, B>
where
    V: Clone + Eq + Hash,
    B: MapBackend<V>,
{
    type Derived = Self;

    fn add_vertex(&mut self, vertex: V) -> Result<bool> {
        Ok(self.insert_vertex(vertex))
    }

    fn put_edge(&mut self, source: V, target: V, weight: i32) -> Result<Option<i32>> {
        let backend = &self.backend;
        let previous = match self.vertex_map.get_mut(&source) {
            Some(slot) => slot
                .get_or_insert_with(|| backend.edge_map(&source))
                .insert(target.clone(), weight),
            None => {
                let mut edges = backend.edge_map(&source);
                edges.insert(target.clone(), weight);
                self.vertex_map.insert(source, Some(edges));
                None
            }
        };
        // The source is always inserted before the target.
        self.insert_vertex(target);
        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(previous)
    }

    fn edge(&self, source: &V, target: &V) -> Option<i32> {
        self.edges_of(source)?.get(target).copied()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertex_map.contains_key(vertex)
    }

    fn remove_edge(&mut self, source: &V, target: &V) -> Option<i32> {
        let slot = self.vertex_map.get_mut(source)?;
        let edges = slot.as_mut()?;
        let weight = edges.remove(target)?;
        if edges.is_empty() {
            *slot = None;
        }
        self.edge_count -= 1;
        Some(weight)
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(slot) = self.vertex_map.remove(vertex) else {
            return false;
        };
        let outgoing = slot.map_or(0, |edges| edges.len());

        let mut incoming = 0;
        for (_, slot) in self.vertex_map.iter_mut() {
            let emptied = match slot {
                Some(edges) => {
                    if edges.remove(vertex).is_some() {
                        incoming += 1;
                    }
                    edges.is_empty()
                }
                None => false,
            };
            if emptied {
                *slot = None;
            }
        }

        self.edge_count -= outgoing + incoming;
        tracing::trace!(outgoing, incoming, "removed vertex with incident edges");
        true
    }

    fn remove_vertices(&mut self, vertices: &VertexSet<V>) {
        let mut removed = 0;
        for vertex in vertices {
            if let Some(slot) = self.vertex_map.remove(vertex) {
                removed += slot.map_or(0, |edges| edges.len());
            }
        }
        for (_, slot) in self.vertex_map.iter_mut() {
            let emptied = match slot {
                Some(edges) => {
                    let before = edges.len();
                    edges.retain(|target, _| !vertices.contains(target));
                    removed += before - edges.len();
                    edges.is_empty()
                }
                None => false,
            };
            if emptied {
                *slot = None;
            }
        }
        self.edge_count -= removed;
    }

    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.vertex_map.iter().map(|(v, _)| v)
    }

    fn targets<'a>(&'a self, source: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.edges_of(source)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(t, _)| t))
    }

    fn sources<'a>(&'a self, target: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.vertex_map
            .iter()
            .filter(move |&(_, slot)| {
                slot.as_ref()
                    .is_some_and(|edges| edges.contains_key(target))
            })
            .map(|(s, _)| s)
    }

    fn vertex_after(&self, after: Option<&V>) -> Option<&V> {
        match after {
            None => self.vertex_map.first_key(),
            Some(v) => self.vertex_map.key_after(v),
        }
    }

    fn target_after(&self, source: &V, after: Option<&V>) -> Option<&V> {
        let edges = self.edges_of(source)?;
        match after {
            None => edges.first_key(),
            Some(t) => edges.key_after(t),
        }
    }

    fn vertex_count(&self) -> usize {
        self.vertex_map.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn in_degree(&self, vertex: &V) -> usize {
        self.sources(vertex).count()
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.edges_of(vertex).map_or(0, |edges| edges.len())
    }

    fn total_weight(&self) -> i64 {
        self.vertex_map
            .iter()
            .filter_map(|(_, slot)| slot.as_ref())
            .flat_map(|edges| edges.iter())
            .map(|(_, &w)| i64::from(w))
            .sum()
    }

    fn reverse(&self) -> Result<Self> {
        crate::alg::reverse(self, &self.digraph_factory())
    }

    fn subgraph(&self, vertices: &VertexSet<V>) -> Result<Self> {
        crate::alg::subgraph(self, vertices, &self.digraph_factory())
    }

    fn is_acyclic(&self) -> bool {
        crate::alg::is_acyclic(self)
    }
}

impl<V, B> fmt::Display for MapDigraph<V, B>
where
    V: Clone + Eq + Hash + fmt::Display,
    B: MapBackend<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("MapDigraph(");
        let mut vertices = self.vertices().peekable();
        while let Some(v) = vertices.next() {
            out.push_str(&v.to_string());
            out.push('[');
            let targets: Vec<String> = self.targets(v).map(|t| t.to_string()).collect();
            out.push_str(&targets.join(", "));
            out.push(']');
            if vertices.peek().is_some() {
                out.push_str(", ");
                if out.len() > DISPLAY_LIMIT {
                    out.push_str("...");
                    break;
                }
            }
        }
        out.push(')');
        f.write_str(&out)
    }
}

impl<V, B> fmt::Debug for MapDigraph<V, B>
where
    V: Clone + Eq + Hash + fmt::Debug,
    B: MapBackend<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.vertex_map.iter().map(|(v, slot)| {
                let edges: Vec<(&V, i32)> = slot
                    .iter()
                    .flat_map(|edges| edges.iter().map(|(t, &w)| (t, w)))
                    .collect();
                (v, edges)
            }))
            .finish()
    }
}
