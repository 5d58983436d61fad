//! Digraph with at most one vertex and an optional self-loop.
//!
//! Used as an allocation-free placeholder wherever an algorithm has to materialize a degenerate
//! graph: the empty graph, an induced subgraph over a disjoint vertex set, or a singleton
//! strongly connected component.

use crate::digraph::{Digraph, VertexSet};
use crate::error::{Error, Result};
use std::fmt;

const SECOND_VERTEX: &str = "trivial digraph holds at most one vertex";
const NON_LOOP_EDGE: &str = "trivial digraph holds no edges other than a self-loop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrivialDigraph<V> {
    vertex: Option<V>,
    // `Some` iff the loop edge exists; a zero weight is a real loop.
    loop_weight: Option<i32>,
}

impl<V> TrivialDigraph<V> {
    pub const fn new() -> Self {
        Self {
            vertex: None,
            loop_weight: None,
        }
    }

    pub const fn with_vertex(vertex: V) -> Self {
        Self {
            vertex: Some(vertex),
            loop_weight: None,
        }
    }

    pub const fn with_loop(vertex: V, weight: i32) -> Self {
        Self {
            vertex: Some(vertex),
            loop_weight: Some(weight),
        }
    }

    pub fn factory() -> fn() -> Self {
        Self::new
    }

    pub fn vertex(&self) -> Option<&V> {
        self.vertex.as_ref()
    }

    pub fn loop_weight(&self) -> Option<i32> {
        self.loop_weight
    }
}

impl<V> Default for TrivialDigraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TrivialDigraph<V>
where
    V: PartialEq,
{
    fn holds(&self, vertex: &V) -> bool {
        self.vertex.as_ref() == Some(vertex)
    }

    fn has_loop_at(&self, vertex: &V) -> bool {
        self.loop_weight.is_some() && self.holds(vertex)
    }
}

impl<V> Digraph<V> for TrivialDigraph<V>
where
    V: Clone + Eq + std::hash::Hash,
{
    type Derived = Self;

    fn add_vertex(&mut self, vertex: V) -> Result<bool> {
        match &self.vertex {
            None => {
                self.vertex = Some(vertex);
                Ok(true)
            }
            Some(v) if *v == vertex => Ok(false),
            Some(_) => {
                tracing::debug!("rejected second vertex");
                Err(Error::Unsupported {
                    reason: SECOND_VERTEX,
                })
            }
        }
    }

    fn put_edge(&mut self, source: V, target: V, weight: i32) -> Result<Option<i32>> {
        if source != target {
            tracing::debug!("rejected non-loop edge");
            return Err(Error::Unsupported {
                reason: NON_LOOP_EDGE,
            });
        }
        self.add_vertex(source)?;
        Ok(self.loop_weight.replace(weight))
    }

    fn edge(&self, source: &V, target: &V) -> Option<i32> {
        if source == target && self.has_loop_at(source) {
            self.loop_weight
        } else {
            None
        }
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.holds(vertex)
    }

    fn remove_edge(&mut self, source: &V, target: &V) -> Option<i32> {
        if source == target && self.has_loop_at(source) {
            self.loop_weight.take()
        } else {
            None
        }
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.holds(vertex) {
            return false;
        }
        self.vertex = None;
        self.loop_weight = None;
        true
    }

    fn remove_vertices(&mut self, vertices: &VertexSet<V>) {
        if self.vertex.as_ref().is_some_and(|v| vertices.contains(v)) {
            self.vertex = None;
            self.loop_weight = None;
        }
    }

    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.vertex.iter()
    }

    fn targets<'a>(&'a self, source: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.vertex
            .iter()
            .filter(move |_| self.has_loop_at(source))
    }

    fn sources<'a>(&'a self, target: &V) -> impl Iterator<Item = &'a V>
    where
        V: 'a,
    {
        self.targets(target)
    }

    fn vertex_after(&self, after: Option<&V>) -> Option<&V> {
        match after {
            None => self.vertex.as_ref(),
            Some(_) => None,
        }
    }

    fn target_after(&self, source: &V, after: Option<&V>) -> Option<&V> {
        match after {
            None if self.has_loop_at(source) => self.vertex.as_ref(),
            _ => None,
        }
    }

    fn vertex_count(&self) -> usize {
        usize::from(self.vertex.is_some())
    }

    fn edge_count(&self) -> usize {
        usize::from(self.loop_weight.is_some())
    }

    fn in_degree(&self, vertex: &V) -> usize {
        usize::from(self.has_loop_at(vertex))
    }

    fn out_degree(&self, vertex: &V) -> usize {
        usize::from(self.has_loop_at(vertex))
    }

    fn total_weight(&self) -> i64 {
        self.loop_weight.map_or(0, i64::from)
    }

    /// A self-loop is its own reverse, so this is an equal copy.
    fn reverse(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn subgraph(&self, vertices: &VertexSet<V>) -> Result<Self> {
        match &self.vertex {
            Some(v) if vertices.contains(v) => Ok(self.clone()),
            _ => Ok(Self::new()),
        }
    }

    fn is_acyclic(&self) -> bool {
        self.loop_weight.is_none()
    }
}

impl<V: fmt::Display> fmt::Display for TrivialDigraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.vertex, self.loop_weight) {
            (None, _) => f.write_str("TrivialDigraph()"),
            (Some(v), None) => write!(f, "TrivialDigraph({v}[])"),
            (Some(v), Some(_)) => write!(f, "TrivialDigraph({v}[{v}])"),
        }
    }
}
