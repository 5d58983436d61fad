#![forbid(unsafe_code)]

//! Weighted directed graphs over arbitrary vertex values.
//!
//! - [`Digraph`] is the contract every representation implements.
//! - [`MapDigraph`] is the general representation, iterating in insertion order or in a
//!   comparator order chosen at construction time.
//! - [`TrivialDigraph`] holds at most one vertex and its optional self-loop.
//! - [`alg`] contains reversal, induced subgraphs and cycle analysis written against the
//!   contract alone.
//!
//! ```
//! use wdigraph::{Digraph, MapDigraph, VertexSet};
//!
//! let mut g = MapDigraph::new();
//! g.put_edge("a", "b", 2)?;
//! g.put_edge("b", "c", 3)?;
//! assert!(g.is_acyclic());
//! assert_eq!(g.total_weight(), 5);
//!
//! let r = g.reverse()?;
//! assert_eq!(r.edge(&"c", &"b"), Some(3));
//!
//! let sub = g.subgraph(&VertexSet::from_iter(["a", "b"]))?;
//! assert!(!sub.contains_vertex(&"c"));
//! # Ok::<(), wdigraph::Error>(())
//! ```

pub mod alg;
pub mod digraph;
pub mod error;
pub mod map;
pub mod trivial;

pub use digraph::{Digraph, DigraphFactory, TargetCursor, VertexCursor, VertexSet};
pub use error::{Error, Result};
pub use map::MapDigraph;
pub use trivial::TrivialDigraph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
