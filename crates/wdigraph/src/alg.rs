//! Algorithms written against the [`Digraph`] contract only.
//!
//! Traversals follow the graph's own iteration order, so results are reproducible for
//! comparator-ordered graphs and depend on insertion order otherwise.

use crate::digraph::{Digraph, DigraphFactory, VertexSet};
use crate::error::Result;
use crate::trivial::TrivialDigraph;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// The canonical graph without vertices.
pub fn empty_digraph<V>() -> TrivialDigraph<V> {
    TrivialDigraph::new()
}

/// Builds a graph with the vertices of `g` and every edge `(s, t, w)` stored as `(t, s, w)`.
pub fn reverse<V, G, R>(g: &G, factory: &impl DigraphFactory<R>) -> Result<R>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
    R: Digraph<V>,
{
    let mut out = factory.create();
    for v in g.vertices() {
        out.add_vertex(v.clone())?;
    }
    for v in g.vertices() {
        for t in g.targets(v) {
            if let Some(w) = g.edge(v, t) {
                out.put_edge(t.clone(), v.clone(), w)?;
            }
        }
    }
    Ok(out)
}

/// Induced subgraph of `g` over `vertices`.
///
/// Vertices of the set that `g` does not contain are not inserted.
pub fn subgraph<V, G, R>(
    g: &G,
    vertices: &VertexSet<V>,
    factory: &impl DigraphFactory<R>,
) -> Result<R>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
    R: Digraph<V>,
{
    let mut out = factory.create();
    for v in g.vertices().filter(|v| vertices.contains(*v)) {
        out.add_vertex(v.clone())?;
        for t in g.targets(v).filter(|t| vertices.contains(*t)) {
            if let Some(w) = g.edge(v, t) {
                out.put_edge(v.clone(), t.clone(), w)?;
            }
        }
    }
    Ok(out)
}

/// Depth-first search over all vertices, reporting each vertex once all of its descendants are
/// finished. Returns `false` as soon as an edge reaches a vertex still on the DFS path.
fn dfs_finish_order<'g, V, G>(g: &'g G, mut finished: impl FnMut(&'g V)) -> bool
where
    V: Eq + Hash + 'g,
    G: Digraph<V>,
{
    let mut visited: VertexSet<&V> = VertexSet::default();
    let mut on_path: VertexSet<&V> = VertexSet::default();

    for root in g.vertices() {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        let mut stack = vec![(root, g.targets(root))];
        while let Some((_, targets)) = stack.last_mut() {
            match targets.next() {
                Some(t) => {
                    if on_path.contains(t) {
                        tracing::trace!(depth = stack.len(), "back edge found");
                        return false;
                    }
                    if visited.insert(t) {
                        on_path.insert(t);
                        stack.push((t, g.targets(t)));
                    }
                }
                None => {
                    if let Some((v, _)) = stack.pop() {
                        on_path.remove(v);
                        finished(v);
                    }
                }
            }
        }
    }
    true
}

/// `true` iff `g` has no directed cycle; self-loops count as cycles.
pub fn is_acyclic<V, G>(g: &G) -> bool
where
    V: Eq + Hash,
    G: Digraph<V>,
{
    dfs_finish_order(g, |_| {})
}

/// Topological order of `g` (every edge points forward), or `None` if `g` has a cycle.
pub fn topsort<V, G>(g: &G) -> Option<Vec<V>>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
{
    let mut order: Vec<V> = Vec::with_capacity(g.vertex_count());
    if !dfs_finish_order(g, |v| order.push(v.clone())) {
        return None;
    }
    order.reverse();
    Some(order)
}

/// Vertices reachable from `start`, including `start` itself. Empty if `start` is unknown.
pub fn closure<V, G>(g: &G, start: &V) -> VertexSet<V>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
{
    let mut seen: VertexSet<V> = VertexSet::default();
    if !g.contains_vertex(start) {
        return seen;
    }
    seen.insert(start.clone());
    let mut pending: Vec<&V> = vec![start];
    while let Some(v) = pending.pop() {
        for t in g.targets(v) {
            if !seen.contains(t) {
                seen.insert(t.clone());
                pending.push(t);
            }
        }
    }
    seen
}

/// Strongly connected components (Tarjan).
///
/// Components come out in reverse topological order of the condensation; vertices inside a
/// component keep the graph's iteration order. The traversal keeps its own frame stack, so path
/// length is bounded by memory rather than by the thread stack.
pub fn scc<V, G>(g: &G) -> Vec<Vec<V>>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
{
    let mut next_index = 0usize;
    let mut indices: HashMap<&V, usize> = HashMap::default();
    let mut lowlink: HashMap<&V, usize> = HashMap::default();
    let mut stack: Vec<&V> = Vec::new();
    let mut on_stack: VertexSet<&V> = VertexSet::default();
    let mut sccs: Vec<Vec<&V>> = Vec::new();

    for root in g.vertices() {
        if indices.contains_key(root) {
            continue;
        }
        indices.insert(root, next_index);
        lowlink.insert(root, next_index);
        next_index += 1;
        stack.push(root);
        on_stack.insert(root);

        let mut frames = vec![(root, g.targets(root))];
        while let Some((v, targets)) = frames.last_mut() {
            let v = *v;
            match targets.next() {
                Some(w) if !indices.contains_key(w) => {
                    indices.insert(w, next_index);
                    lowlink.insert(w, next_index);
                    next_index += 1;
                    stack.push(w);
                    on_stack.insert(w);
                    frames.push((w, g.targets(w)));
                }
                Some(w) => {
                    if !on_stack.contains(w) {
                        continue;
                    }
                    let (Some(&v_low), Some(&w_idx)) = (lowlink.get(v), indices.get(w)) else {
                        debug_assert!(false, "tarjan index missing");
                        continue;
                    };
                    lowlink.insert(v, v_low.min(w_idx));
                }
                None => {
                    frames.pop();
                    let (Some(&v_low), Some(&v_idx)) = (lowlink.get(v), indices.get(v)) else {
                        debug_assert!(false, "tarjan lowlink missing");
                        continue;
                    };
                    if let Some((parent, _)) = frames.last() {
                        if let Some(&p_low) = lowlink.get(*parent) {
                            lowlink.insert(*parent, p_low.min(v_low));
                        }
                    }
                    if v_low == v_idx {
                        let mut component: Vec<&V> = Vec::new();
                        while let Some(w) = stack.pop() {
                            on_stack.remove(w);
                            component.push(w);
                            if w == v {
                                break;
                            }
                        }
                        sccs.push(component);
                    }
                }
            }
        }
    }

    let order: HashMap<&V, usize> = g.vertices().enumerate().map(|(i, v)| (v, i)).collect();
    let components: Vec<Vec<V>> = sccs
        .into_iter()
        .map(|mut component| {
            component.sort_by_key(|v| order.get(v).copied().unwrap_or(usize::MAX));
            component.into_iter().cloned().collect()
        })
        .collect();
    tracing::debug!(components = components.len(), "computed strongly connected components");
    components
}

/// `true` iff every vertex reaches every other vertex. The empty graph qualifies.
pub fn is_strongly_connected<V, G>(g: &G) -> bool
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
{
    let Some(first) = g.vertices().next() else {
        return true;
    };
    if closure(g, first).len() != g.vertex_count() {
        return false;
    }
    scc(g).len() == 1
}

/// A strongly connected component materialized as a graph.
#[derive(Debug, Clone)]
pub enum Component<V, R> {
    /// A single vertex, with its self-loop if it has one.
    Trivial(TrivialDigraph<V>),
    /// An induced subgraph over two or more vertices.
    General(R),
}

impl<V, R> Component<V, R>
where
    V: Clone + Eq + Hash,
    R: Digraph<V>,
{
    pub fn vertex_count(&self) -> usize {
        match self {
            Component::Trivial(g) => g.vertex_count(),
            Component::General(g) => g.vertex_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            Component::Trivial(g) => g.edge_count(),
            Component::General(g) => g.edge_count(),
        }
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        match self {
            Component::Trivial(g) => g.contains_vertex(vertex),
            Component::General(g) => g.contains_vertex(vertex),
        }
    }
}

/// Strongly connected components of `g` as induced subgraphs, in [`scc`] order.
///
/// Singleton components become [`TrivialDigraph`]s; larger ones are built with `factory`.
pub fn scc_digraphs<V, G, R>(
    g: &G,
    factory: &impl DigraphFactory<R>,
) -> Result<Vec<Component<V, R>>>
where
    V: Clone + Eq + Hash,
    G: Digraph<V>,
    R: Digraph<V>,
{
    scc(g)
        .into_iter()
        .map(|component| {
            if let [v] = component.as_slice() {
                let single = match g.edge(v, v) {
                    Some(w) => TrivialDigraph::with_loop(v.clone(), w),
                    None => TrivialDigraph::with_vertex(v.clone()),
                };
                return Ok(Component::Trivial(single));
            }
            let members: VertexSet<V> = component.into_iter().collect();
            subgraph(g, &members, factory).map(Component::General)
        })
        .collect()
}
