use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet};
use wdigraph::map::MapBackend;
use wdigraph::{Digraph, MapDigraph, VertexSet, alg};

#[derive(Debug, Clone)]
enum Operation {
    AddVertex(u8),
    PutEdge(u8, u8, i32),
    RemoveEdge(u8, u8),
    RemoveVertex(u8),
    RemoveVertices(Vec<u8>),
}

fn operation() -> impl Strategy<Value = Operation> {
    // Small vertex range so removals hit existing vertices often.
    let v = 0u8..12;
    prop_oneof![
        v.clone().prop_map(Operation::AddVertex),
        (v.clone(), v.clone(), -50i32..50).prop_map(|(s, t, w)| Operation::PutEdge(s, t, w)),
        (v.clone(), v.clone()).prop_map(|(s, t)| Operation::RemoveEdge(s, t)),
        v.clone().prop_map(Operation::RemoveVertex),
        proptest::collection::vec(v, 0..4).prop_map(Operation::RemoveVertices),
    ]
}

fn edge_list(edges: impl IntoIterator<Item = (u8, u8, i32)>) -> Vec<(u8, u8, i32)> {
    let mut out: Vec<_> = edges.into_iter().collect();
    out.sort();
    out
}

fn edges_of<G: Digraph<u8>>(g: &G) -> Vec<(u8, u8, i32)> {
    edge_list(g.vertices().flat_map(|s| {
        g.targets(s)
            .map(move |t| (*s, *t, g.edge(s, t).unwrap_or_default()))
    }))
}

fn random_graph() -> impl Strategy<Value = MapDigraph<u8>> {
    proptest::collection::vec((0u8..10, 0u8..10, -9i32..10), 0..40).prop_map(|edges| {
        let mut g = MapDigraph::new();
        for (s, t, w) in edges {
            g.put_edge(s, t, w).unwrap();
        }
        g
    })
}

/// Replays `ops` on `g` and on a std-collections model, comparing them after every step.
fn check_against_model<B>(
    mut g: MapDigraph<u8, B>,
    ops: Vec<Operation>,
) -> Result<MapDigraph<u8, B>, TestCaseError>
where
    B: MapBackend<u8>,
{
    let mut vertices: BTreeSet<u8> = BTreeSet::new();
    let mut edges: BTreeMap<(u8, u8), i32> = BTreeMap::new();

    for op in ops {
        match op {
            Operation::AddVertex(v) => {
                prop_assert_eq!(g.add_vertex(v).unwrap(), vertices.insert(v));
            }
            Operation::PutEdge(s, t, w) => {
                vertices.insert(s);
                vertices.insert(t);
                prop_assert_eq!(g.put_edge(s, t, w).unwrap(), edges.insert((s, t), w));
            }
            Operation::RemoveEdge(s, t) => {
                prop_assert_eq!(g.remove_edge(&s, &t), edges.remove(&(s, t)));
            }
            Operation::RemoveVertex(v) => {
                prop_assert_eq!(g.remove_vertex(&v), vertices.remove(&v));
                edges.retain(|&(s, t), _| s != v && t != v);
            }
            Operation::RemoveVertices(vs) => {
                let gone: VertexSet<u8> = vs.into_iter().collect();
                g.remove_vertices(&gone);
                vertices.retain(|v| !gone.contains(v));
                edges.retain(|(s, t), _| !gone.contains(s) && !gone.contains(t));
            }
        }
        prop_assert_eq!(g.edge_count(), edges.len());
        prop_assert_eq!(g.vertex_count(), vertices.len());
    }

    prop_assert_eq!(g.vertices().copied().collect::<BTreeSet<_>>(), vertices.clone());
    prop_assert_eq!(edges_of(&g), edge_list(edges.iter().map(|(&(s, t), &w)| (s, t, w))));
    let model_weight: i64 = edges.values().map(|&w| i64::from(w)).sum();
    prop_assert_eq!(g.total_weight(), model_weight);
    for v in &vertices {
        let out = edges.keys().filter(|(s, _)| s == v).count();
        let inc = edges.keys().filter(|(_, t)| t == v).count();
        prop_assert_eq!(g.out_degree(v), out);
        prop_assert_eq!(g.in_degree(v), inc);
    }
    Ok(g)
}

proptest! {
    #[test]
    fn map_digraph_matches_model(ops in proptest::collection::vec(operation(), 1..120)) {
        check_against_model(MapDigraph::new(), ops)?;
    }

    #[test]
    fn sorted_map_digraph_matches_model(ops in proptest::collection::vec(operation(), 1..120)) {
        let g = check_against_model(MapDigraph::sorted(), ops)?;
        let order: Vec<u8> = g.vertices().copied().collect();
        prop_assert!(order.is_sorted(), "vertices out of order: {:?}", order);
        for v in &order {
            let targets: Vec<u8> = g.targets(v).copied().collect();
            prop_assert!(targets.is_sorted(), "targets of {} out of order: {:?}", v, targets);
        }
    }

    #[test]
    fn degrees_sum_to_edge_count(g in random_graph()) {
        let out: usize = g.vertices().map(|v| g.out_degree(v)).sum();
        let inc: usize = g.vertices().map(|v| g.in_degree(v)).sum();
        prop_assert_eq!(out, g.edge_count());
        prop_assert_eq!(inc, g.edge_count());
    }

    #[test]
    fn reverse_twice_restores_edges(g in random_graph()) {
        let r = g.reverse().unwrap();
        prop_assert_eq!(r.vertex_count(), g.vertex_count());
        prop_assert_eq!(r.edge_count(), g.edge_count());
        prop_assert_eq!(r.total_weight(), g.total_weight());
        for (s, t, w) in edges_of(&g) {
            prop_assert_eq!(r.edge(&t, &s), Some(w));
        }
        prop_assert_eq!(edges_of(&r.reverse().unwrap()), edges_of(&g));
    }

    #[test]
    fn subgraph_is_induced(g in random_graph(), keep in proptest::collection::hash_set(0u8..12, 0..12)) {
        let keep: VertexSet<u8> = keep.into_iter().collect();
        let sub = g.subgraph(&keep).unwrap();
        for v in sub.vertices() {
            prop_assert!(keep.contains(v) && g.contains_vertex(v));
        }
        let expected: Vec<_> = edges_of(&g)
            .into_iter()
            .filter(|(s, t, _)| keep.contains(s) && keep.contains(t))
            .collect();
        prop_assert_eq!(edges_of(&sub), expected);
    }

    #[test]
    fn acyclic_iff_topsort_exists(g in random_graph()) {
        prop_assert_eq!(g.is_acyclic(), alg::topsort(&g).is_some());
        let sccs = alg::scc(&g);
        let covered: usize = sccs.iter().map(Vec::len).sum();
        prop_assert_eq!(covered, g.vertex_count());
        if g.is_acyclic() {
            prop_assert_eq!(sccs.len(), g.vertex_count());
        }
    }
}
