//! Node/link graph for visualization tooling.
//!
//! Each tag becomes a file node, a symbol node and one link. Symbol ids are
//! prefixed with the kind code so a type and a function sharing a name stay
//! apart. Package and import nodes use the bare name instead, which folds
//! repeated references to the same namespace into one node.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::Tag;
use crate::types::NodeClass;

/// Weight of every link.
pub const LINK_VALUE: u32 = 1;

const MAX_NODE_SIZE: u32 = 30;
const NODE_SIZE_STEP: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub size: u32,
    pub group: u32,
    pub id: String,
    pub class: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub value: u32,
    pub relation: String,
    pub attributes: BTreeMap<String, String>,
}

/// The graph projection of a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFragment {
    pub file: Node,
    pub symbol: Node,
    pub link: Link,
}

/// Nodes de-duplicated by id, links in arrival order.
///
/// The id index is kept in step with `nodes` by [`Graph::push`] only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment. The first node seen for an id wins.
    pub fn push(&mut self, fragment: GraphFragment) {
        for node in [fragment.file, fragment.symbol] {
            if self.seen.insert(node.id.clone()) {
                self.nodes.push(node);
            }
        }
        self.links.push(fragment.link);
    }

    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        let mut graph = Self::new();
        for tag in tags {
            graph.push(render_graph_fragment(tag));
        }
        graph
    }
}

fn node_size(class: NodeClass) -> u32 {
    MAX_NODE_SIZE.saturating_sub(class.order() * NODE_SIZE_STEP)
}

/// Graph id of a tag's symbol node.
///
/// Ids are unique within a node class only. A package or import named like
/// a file path gets that file node's id, and the two merge into one node.
pub fn symbol_id(tag: &Tag) -> String {
    if tag.kind.is_namespace_reference() {
        tag.name.clone()
    } else {
        format!("{}:{}", tag.kind.code(), tag.name)
    }
}

fn file_node(file: &str) -> Node {
    let class = NodeClass::File;
    Node {
        size: node_size(class),
        group: class.order(),
        id: file.to_string(),
        class: class.label().to_string(),
        attributes: BTreeMap::new(),
    }
}

fn symbol_node(tag: &Tag) -> Node {
    let class = NodeClass::Symbol(tag.kind);
    let mut attributes = BTreeMap::from([
        ("kind".to_string(), tag.kind.code().to_string()),
        ("label".to_string(), tag.kind.label().to_string()),
    ]);
    // namespace nodes are shared between files, so they carry no origin
    if !tag.kind.is_namespace_reference() {
        attributes.insert("file".to_string(), tag.file.clone());
        attributes.insert("address".to_string(), tag.address.clone());
    }

    Node {
        size: node_size(class),
        group: class.order(),
        id: symbol_id(tag),
        class: class.label().to_string(),
        attributes,
    }
}

pub fn render_graph_fragment(tag: &Tag) -> GraphFragment {
    let file = file_node(&tag.file);
    let symbol = symbol_node(tag);

    let (source, target) = if tag.kind.contains_file() {
        (symbol.id.clone(), file.id.clone())
    } else {
        (file.id.clone(), symbol.id.clone())
    };

    let link = Link {
        source,
        target,
        value: LINK_VALUE,
        relation: tag.kind.relation_label().to_string(),
        attributes: tag
            .present_fields()
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_string()))
            .collect(),
    };

    GraphFragment { file, symbol, link }
}
