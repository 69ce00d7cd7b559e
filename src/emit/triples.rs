//! Subject-relation-object triples for semantic stores.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::Tag;
use crate::types::NodeClass;

pub const NODE_TAG: &str = "node";
pub const EDGE_TAG: &str = "edge";
pub const LOCATION_LABEL: &str = "location";

/// One entry of the triple view.
///
/// Serializes as a flat string array:
/// `["node", category, key, display]` or
/// `["edge", relation, source, target, "location", address, k1, v1, ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triple {
    Node {
        category: &'static str,
        key: String,
        display: String,
    },
    Edge {
        relation: &'static str,
        source: String,
        target: String,
        address: String,
        attributes: Vec<(&'static str, String)>,
    },
}

impl Triple {
    pub fn to_tuple(&self) -> Vec<&str> {
        match self {
            Triple::Node {
                category,
                key,
                display,
            } => vec![NODE_TAG, *category, key.as_str(), display.as_str()],
            Triple::Edge {
                relation,
                source,
                target,
                address,
                attributes,
            } => {
                let mut tuple = vec![
                    EDGE_TAG,
                    *relation,
                    source.as_str(),
                    target.as_str(),
                    LOCATION_LABEL,
                    address.as_str(),
                ];
                for (k, v) in attributes {
                    tuple.push(*k);
                    tuple.push(v.as_str());
                }
                tuple
            }
        }
    }
}

impl Serialize for Triple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tuple = self.to_tuple();
        let mut seq = serializer.serialize_seq(Some(tuple.len()))?;
        for item in tuple {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// File node, symbol node, then the edge joining them.
///
/// Package declarations point from the package to the file; every other
/// kind points from the file to the symbol.
pub fn render_triples(tag: &Tag) -> [Triple; 3] {
    let file_node = Triple::Node {
        category: NodeClass::File.label(),
        key: tag.file.clone(),
        display: tag.file.clone(),
    };
    let symbol_node = Triple::Node {
        category: tag.kind.label(),
        key: tag.name.clone(),
        display: tag.name.clone(),
    };

    let (source, target) = if tag.kind.contains_file() {
        (tag.name.clone(), tag.file.clone())
    } else {
        (tag.file.clone(), tag.name.clone())
    };

    let edge = Triple::Edge {
        relation: tag.kind.relation_label(),
        source,
        target,
        address: tag.address.clone(),
        attributes: tag
            .present_fields()
            .into_iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect(),
    };

    [file_node, symbol_node, edge]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TagField, TagKind};

    #[test]
    fn test_function_triples() {
        let tag = Tag::new("Add", "math.src", 10, TagKind::Function)
            .with_field(TagField::Signature, "(a,b int) int")
            .with_field(TagField::Access, "");
        let triples = render_triples(&tag);

        assert_eq!(triples[0].to_tuple(), vec!["node", "file", "math.src", "math.src"]);
        assert_eq!(triples[1].to_tuple(), vec!["node", "function", "Add", "Add"]);
        assert_eq!(
            triples[2].to_tuple(),
            vec![
                "edge",
                "defines function",
                "math.src",
                "Add",
                "location",
                "10",
                "line",
                "10",
                "signature",
                "(a,b int) int",
            ]
        );
    }

    #[test]
    fn test_package_edge_is_reversed() {
        let tag = Tag::new("pkgA", "a.src", 1, TagKind::Package);
        let [_, _, edge] = render_triples(&tag);
        match edge {
            Triple::Edge { source, target, .. } => {
                assert_eq!(source, "pkgA");
                assert_eq!(target, "a.src");
            }
            other => panic!("expected edge, got {other:?}"),
        }
    }

    #[test]
    fn test_only_package_reverses() {
        for kind in TagKind::ALL {
            let tag = Tag::new("sym", "file.src", 2, kind);
            let [_, _, edge] = render_triples(&tag);
            let tuple = edge.to_tuple();
            let reversed = tuple[2] == "sym";
            assert_eq!(reversed, kind == TagKind::Package, "{kind:?}");
        }
    }

    #[test]
    fn test_serializes_as_string_array() {
        let tag = Tag::new("Max", "m.src", 4, TagKind::Constant);
        let json = serde_json::to_string(&render_triples(&tag)[1]).unwrap();
        assert_eq!(json, r#"["node","constant","Max","Max"]"#);
    }
}
