//! The `Digraph` contract shared by every representation.
//!
//! Representations differ in what they can hold ([`TrivialDigraph`](crate::TrivialDigraph)
//! rejects anything beyond one vertex and its loop) and in iteration order, but all of them
//! answer the same queries with the same edge-weight semantics: an edge exists iff it was
//! inserted, and a weight of `0` is a present edge.

use crate::error::{Error, Result};
use rustc_hash::FxBuildHasher;

/// Vertex set used by induced-subgraph extraction and bulk removal.
pub type VertexSet<V> = hashbrown::HashSet<V, FxBuildHasher>;

/// Produces fresh, empty graphs of one representation.
///
/// Any `Fn() -> G` closure or function item is a factory, so `MapDigraph::new` and
/// `TrivialDigraph::new` can be passed directly.
pub trait DigraphFactory<G> {
    fn create(&self) -> G;
}

impl<G, F> DigraphFactory<G> for F
where
    F: Fn() -> G,
{
    fn create(&self) -> G {
        self()
    }
}

/// Weighted directed graph over vertices of type `V`.
pub trait Digraph<V> {
    /// Representation returned by [`reverse`](Digraph::reverse) and
    /// [`subgraph`](Digraph::subgraph).
    type Derived: Digraph<V>;

    /// Adds `vertex`; returns `false` if it was already present.
    fn add_vertex(&mut self, vertex: V) -> Result<bool>;

    /// Inserts or overwrites the edge `source -> target`, adding both endpoints as vertices.
    ///
    /// Returns the previous weight if the edge existed.
    fn put_edge(&mut self, source: V, target: V, weight: i32) -> Result<Option<i32>>;

    /// Weight of `source -> target`, or `None` if there is no such edge.
    fn edge(&self, source: &V, target: &V) -> Option<i32>;

    fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.edge(source, target).is_some()
    }

    fn contains_vertex(&self, vertex: &V) -> bool;

    /// Removes `source -> target` and returns its weight. Endpoints stay in the graph.
    fn remove_edge(&mut self, source: &V, target: &V) -> Option<i32>;

    /// Removes `vertex` together with all of its incoming and outgoing edges.
    fn remove_vertex(&mut self, vertex: &V) -> bool;

    /// Removes every listed vertex and all edges incident to any of them.
    fn remove_vertices(&mut self, vertices: &VertexSet<V>);

    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        V: 'a;

    /// Out-neighbours of `source`, in edge storage order.
    fn targets<'a>(&'a self, source: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a;

    /// In-neighbours of `target`.
    fn sources<'a>(&'a self, target: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a;

    /// The vertex following `after` in iteration order (the first vertex for `None`).
    fn vertex_after(&self, after: Option<&V>) -> Option<&V>;

    /// The target following `after` among the out-neighbours of `source`.
    fn target_after(&self, source: &V, after: Option<&V>) -> Option<&V>;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn in_degree(&self, vertex: &V) -> usize;

    fn out_degree(&self, vertex: &V) -> usize;

    /// Sum of all edge weights.
    fn total_weight(&self) -> i64;

    /// Same vertices, every edge flipped with its weight preserved.
    fn reverse(&self) -> Result<Self::Derived>;

    /// Induced subgraph over `vertices`; vertices unknown to this graph are ignored.
    fn subgraph(&self, vertices: &VertexSet<V>) -> Result<Self::Derived>;

    /// `true` iff there is no directed cycle. A self-loop is a cycle.
    fn is_acyclic(&self) -> bool;

    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Cursor over the vertices that may remove the current vertex (and its edges).
    fn vertex_cursor(&mut self) -> VertexCursor<'_, V, Self>
    where
        Self: Sized,
    {
        VertexCursor {
            graph: self,
            position: Position::Start,
        }
    }

    /// Cursor over the targets of `source` that may remove the current edge.
    fn target_cursor(&mut self, source: V) -> TargetCursor<'_, V, Self>
    where
        Self: Sized,
    {
        TargetCursor {
            graph: self,
            source,
            position: Position::Start,
        }
    }
}

#[derive(Debug, Clone)]
enum Position<V> {
    Start,
    At(V),
    Removed { next: Option<V> },
    Done,
}

impl<V: Clone> Position<V> {
    fn current(&self) -> Result<&V> {
        match self {
            Position::At(v) => Ok(v),
            Position::Start => Err(Error::InvalidState {
                reason: "remove called before advance",
            }),
            Position::Removed { .. } => Err(Error::InvalidState {
                reason: "current element was already removed",
            }),
            Position::Done => Err(Error::InvalidState {
                reason: "cursor is exhausted",
            }),
        }
    }

    fn step(&mut self, next: impl FnOnce(Option<&V>) -> Option<V>) -> Option<V> {
        let next = match std::mem::replace(self, Position::Done) {
            Position::Start => next(None),
            Position::At(cur) => next(Some(&cur)),
            Position::Removed { next } => next,
            Position::Done => None,
        };
        if let Some(v) = &next {
            *self = Position::At(v.clone());
        }
        next
    }
}

/// Walks the vertices of a graph it borrows mutably.
///
/// [`remove`](VertexCursor::remove) is the only mutation allowed during the walk; calling it
/// before [`advance`](VertexCursor::advance) or twice for the same vertex fails with
/// [`Error::InvalidState`] and leaves the graph unchanged.
pub struct VertexCursor<'g, V, G> {
    graph: &'g mut G,
    position: Position<V>,
}

impl<V, G> VertexCursor<'_, V, G>
where
    V: Clone,
    G: Digraph<V>,
{
    pub fn advance(&mut self) -> Option<V> {
        let graph = &*self.graph;
        self.position.step(|after| graph.vertex_after(after).cloned())
    }

    pub fn remove(&mut self) -> Result<()> {
        let current = self.position.current()?.clone();
        let next = self.graph.vertex_after(Some(&current)).cloned();
        self.graph.remove_vertex(&current);
        self.position = Position::Removed { next };
        Ok(())
    }

    pub fn graph(&self) -> &G {
        self.graph
    }
}

/// Walks the out-neighbours of one source vertex; removal drops exactly one edge.
pub struct TargetCursor<'g, V, G> {
    graph: &'g mut G,
    source: V,
    position: Position<V>,
}

impl<V, G> TargetCursor<'_, V, G>
where
    V: Clone,
    G: Digraph<V>,
{
    pub fn advance(&mut self) -> Option<V> {
        let graph = &*self.graph;
        let source = &self.source;
        self.position
            .step(|after| graph.target_after(source, after).cloned())
    }

    pub fn remove(&mut self) -> Result<()> {
        let current = self.position.current()?.clone();
        let next = self.graph.target_after(&self.source, Some(&current)).cloned();
        self.graph.remove_edge(&self.source, &current);
        self.position = Position::Removed { next };
        Ok(())
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn graph(&self) -> &G {
        self.graph
    }
}
