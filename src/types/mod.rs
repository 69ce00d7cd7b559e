//! Closed symbol taxonomy shared by every output view.
//!
//! Each [`TagKind`] carries its own code, label, relation label and
//! ordering index, so the tags, triples and graph views can never disagree
//! about a kind. The synthetic file container only exists as a
//! [`NodeClass`], since files are never tagged themselves.

use serde::{Deserialize, Serialize};

/// Category of a tagged declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagKind {
    #[serde(rename = "p", alias = "package")]
    Package,
    #[serde(rename = "i", alias = "import")]
    Import,
    #[serde(rename = "c", alias = "constant")]
    Constant,
    #[serde(rename = "v", alias = "variable")]
    Variable,
    #[serde(rename = "t", alias = "type")]
    Type,
    #[serde(rename = "n", alias = "interface")]
    Interface,
    #[serde(rename = "w", alias = "field")]
    Field,
    #[serde(rename = "e", alias = "embedded")]
    Embedded,
    #[serde(rename = "m", alias = "method")]
    Method,
    #[serde(rename = "r", alias = "constructor")]
    Constructor,
    #[serde(rename = "f", alias = "function")]
    Function,
}

impl TagKind {
    pub const ALL: [TagKind; 11] = [
        TagKind::Package,
        TagKind::Import,
        TagKind::Constant,
        TagKind::Variable,
        TagKind::Type,
        TagKind::Interface,
        TagKind::Field,
        TagKind::Embedded,
        TagKind::Method,
        TagKind::Constructor,
        TagKind::Function,
    ];

    /// Single character written in the kind column of a tags line.
    pub fn code(self) -> char {
        match self {
            Self::Package => 'p',
            Self::Import => 'i',
            Self::Constant => 'c',
            Self::Variable => 'v',
            Self::Type => 't',
            Self::Interface => 'n',
            Self::Field => 'w',
            Self::Embedded => 'e',
            Self::Method => 'm',
            Self::Constructor => 'r',
            Self::Function => 'f',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Import => "import",
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Field => "field",
            Self::Embedded => "embedded",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Function => "function",
        }
    }

    /// Label of the edge joining a file and a declaration of this kind.
    pub fn relation_label(self) -> &'static str {
        match self {
            Self::Package => "declares package",
            Self::Import => "imports",
            Self::Constant => "defines constant",
            Self::Variable => "defines variable",
            Self::Type => "defines type",
            Self::Interface => "defines interface",
            Self::Field => "defines field",
            Self::Embedded => "embeds",
            Self::Method => "defines method",
            Self::Constructor => "defines constructor",
            Self::Function => "defines function",
        }
    }

    /// Grouping index used for node sizing and coloring.
    pub fn order(self) -> u32 {
        match self {
            Self::Package => 1,
            Self::Import => 2,
            Self::Type => 3,
            Self::Interface => 4,
            Self::Constant => 5,
            Self::Variable => 6,
            Self::Constructor => 7,
            Self::Function => 8,
            Self::Method => 9,
            Self::Field => 10,
            Self::Embedded => 11,
        }
    }

    /// A package declaration contains its file, so edges run symbol -> file.
    pub fn contains_file(self) -> bool {
        matches!(self, Self::Package)
    }

    /// Package and import nodes are shared by name across files.
    pub fn is_namespace_reference(self) -> bool {
        matches!(self, Self::Package | Self::Import)
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Class of a node in the graph and triple views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    File,
    Symbol(TagKind),
}

impl NodeClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Symbol(kind) => kind.label(),
        }
    }

    pub fn order(self) -> u32 {
        match self {
            Self::File => 0,
            Self::Symbol(kind) => kind.order(),
        }
    }
}

/// Extension field keys attached to a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TagField {
    #[serde(rename = "access")]
    Access,
    #[serde(rename = "signature")]
    Signature,
    #[serde(rename = "type")]
    TypeField,
    #[serde(rename = "ctype")]
    ReceiverType,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "ntype")]
    InterfaceType,
    #[serde(rename = "language")]
    Language,
}

impl TagField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Signature => "signature",
            Self::TypeField => "type",
            Self::ReceiverType => "ctype",
            Self::Line => "line",
            Self::InterfaceType => "ntype",
            Self::Language => "language",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_distinct_code() {
        let codes: HashSet<char> = TagKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), TagKind::ALL.len());

        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TagKind::from_code('x'), None);
    }

    #[test]
    fn test_taxonomy_tables_are_total() {
        let labels: HashSet<&str> = TagKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), TagKind::ALL.len());
        assert!(!labels.contains("file"));

        for kind in TagKind::ALL {
            assert!(!kind.relation_label().is_empty(), "{kind:?} has no relation");
            assert!(kind.order() > NodeClass::File.order());
            assert_eq!(NodeClass::Symbol(kind).label(), kind.label());
            assert_eq!(NodeClass::Symbol(kind).order(), kind.order());
        }
    }

    #[test]
    fn test_namespace_kinds() {
        let reversed: Vec<TagKind> = TagKind::ALL
            .into_iter()
            .filter(|k| k.contains_file())
            .collect();
        assert_eq!(reversed, vec![TagKind::Package]);

        assert!(TagKind::Import.is_namespace_reference());
        assert!(TagKind::Package.is_namespace_reference());
        assert!(!TagKind::Function.is_namespace_reference());
    }

    #[test]
    fn test_kind_serde_accepts_code_and_label() {
        let kind: TagKind = serde_json::from_str("\"f\"").unwrap();
        assert_eq!(kind, TagKind::Function);
        let kind: TagKind = serde_json::from_str("\"interface\"").unwrap();
        assert_eq!(kind, TagKind::Interface);
        assert_eq!(serde_json::to_string(&TagKind::Method).unwrap(), "\"m\"");
        assert!(serde_json::from_str::<TagKind>("\"struct\"").is_err());
    }

    #[test]
    fn test_field_names_match_serde() {
        for field in [
            TagField::Access,
            TagField::Signature,
            TagField::TypeField,
            TagField::ReceiverType,
            TagField::Line,
            TagField::InterfaceType,
            TagField::Language,
        ] {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }
}
