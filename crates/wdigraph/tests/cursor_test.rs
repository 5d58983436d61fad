use wdigraph::{Digraph, Error, MapDigraph, TrivialDigraph};

fn ring(n: u32) -> MapDigraph<u32> {
    let mut g = MapDigraph::new();
    for i in 0..n {
        g.put_edge(i, (i + 1) % n, 1).unwrap();
        g.put_edge(i, (i + 2) % n, 1).unwrap();
    }
    g
}

#[test]
fn vertex_cursor_visits_every_vertex_in_order() {
    let mut g = ring(4);
    let mut cursor = g.vertex_cursor();
    let mut seen = Vec::new();
    while let Some(v) = cursor.advance() {
        seen.push(v);
    }
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn vertex_cursor_removal_cascades_edges() {
    let mut g = ring(5);
    assert_eq!(g.edge_count(), 10);

    let mut cursor = g.vertex_cursor();
    let mut seen = Vec::new();
    while let Some(v) = cursor.advance() {
        seen.push(v);
        if v % 2 == 0 {
            cursor.remove().unwrap();
        }
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);

    assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec![1, 3]);
    // Only 1->3 survives among edges between odd vertices.
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge(&1, &3), Some(1));
}

#[test]
fn target_cursor_removes_single_edges() {
    let mut g = MapDigraph::new();
    for t in ["b", "c", "d"] {
        g.put_edge("a", t, 1).unwrap();
    }
    g.put_edge("b", "a", 1).unwrap();

    let mut cursor = g.target_cursor("a");
    let mut seen = Vec::new();
    while let Some(t) = cursor.advance() {
        seen.push(t);
        if t != "c" {
            cursor.remove().unwrap();
        }
    }
    assert_eq!(seen, vec!["b", "c", "d"]);
    assert_eq!(cursor.source(), &"a");

    assert_eq!(g.targets(&"a").copied().collect::<Vec<_>>(), vec!["c"]);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.vertex_count(), 4);
}

#[test]
fn removing_every_target_resets_out_degree() {
    let mut g = MapDigraph::new();
    g.put_edge(1, 2, 1).unwrap();
    g.put_edge(1, 3, 1).unwrap();

    let mut cursor = g.target_cursor(1);
    while cursor.advance().is_some() {
        cursor.remove().unwrap();
    }
    assert_eq!(g.out_degree(&1), 0);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.vertex_count(), 3);
}

#[test]
fn remove_before_advance_is_invalid_state() {
    let mut g = ring(3);
    let mut cursor = g.vertex_cursor();
    assert!(matches!(cursor.remove(), Err(Error::InvalidState { .. })));
    assert_eq!(cursor.graph().vertex_count(), 3);
}

#[test]
fn double_remove_is_invalid_state() {
    let mut g = ring(3);
    let mut cursor = g.vertex_cursor();
    cursor.advance();
    cursor.remove().unwrap();
    assert!(matches!(cursor.remove(), Err(Error::InvalidState { .. })));
    assert_eq!(cursor.graph().vertex_count(), 2);

    let mut t = g.target_cursor(1);
    t.advance();
    t.remove().unwrap();
    assert!(matches!(t.remove(), Err(Error::InvalidState { .. })));
}

#[test]
fn remove_after_exhaustion_is_invalid_state() {
    let mut g = ring(2);
    let mut cursor = g.target_cursor(0);
    while cursor.advance().is_some() {}
    assert!(matches!(cursor.remove(), Err(Error::InvalidState { .. })));
}

#[test]
fn comparator_order_cursor_resumes_after_removed_vertex() {
    let mut g = MapDigraph::with_comparator(|a: &char, b: &char| a.cmp(b));
    for v in ['d', 'a', 'c', 'b'] {
        g.add_vertex(v).unwrap();
    }
    g.put_edge('a', 'b', 1).unwrap();

    let mut cursor = g.vertex_cursor();
    let mut seen = Vec::new();
    while let Some(v) = cursor.advance() {
        seen.push(v);
        if v == 'b' {
            cursor.remove().unwrap();
        }
    }
    assert_eq!(seen, vec!['a', 'b', 'c', 'd']);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.vertices().copied().collect::<Vec<_>>(), vec!['a', 'c', 'd']);
}

#[test]
fn trivial_cursors_remove_vertex_and_loop() {
    let mut g = TrivialDigraph::with_loop("a", 2);

    let mut targets = g.target_cursor("a");
    assert_eq!(targets.advance(), Some("a"));
    targets.remove().unwrap();
    assert_eq!(targets.advance(), None);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.vertex_count(), 1);

    let mut vertices = g.vertex_cursor();
    assert_eq!(vertices.advance(), Some("a"));
    vertices.remove().unwrap();
    assert_eq!(vertices.advance(), None);
    assert!(g.is_empty());
}
