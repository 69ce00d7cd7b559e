//! Symbol tags, semantic triples and visualization graphs.
//!
//! A [`Tag`] is one declaration produced by an external scanner. The crate
//! renders a batch of tags three ways: tags-file lines ([`Tag::render_line`]),
//! subject-relation-object triples ([`emit::render_triples`]) and a node/link
//! graph ([`emit::render_graph_fragment`]), all driven by the closed
//! [`TagKind`] taxonomy.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod fields;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod tag;
pub mod types;

pub use config::Settings;
pub use emit::{Graph, GraphFragment, Link, Node, Triple, render_graph_fragment, render_triples};
pub use error::{TagError, TagResult};
pub use fields::{FieldFlag, FieldSet, parse_extra_symbols, parse_fields};
pub use pipeline::TagPipeline;
pub use tag::Tag;
pub use types::{NodeClass, TagField, TagKind};
