//! Alternate views of a tag stream.
//!
//! The tags-file line lives on [`Tag`](crate::Tag) itself; this module
//! holds the semantic triple and visualization graph projections.

pub mod graph;
pub mod triples;

pub use graph::{Graph, GraphFragment, Link, Node, render_graph_fragment};
pub use triples::{Triple, render_triples};
