//! A single tagged declaration and its tags-file line.

use std::collections::HashMap;
use std::fmt;

use crate::types::{TagField, TagKind};

/// One declaration found in a source file.
///
/// Emitters only read a tag. The field map has no defined iteration
/// order, so every view sorts explicitly when it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub file: String,
    pub address: String,
    pub kind: TagKind,
    pub fields: HashMap<TagField, String>,
}

impl Tag {
    /// Create a tag at a 1-based line. The line is kept both as the
    /// address and as the `line` field.
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: u32, kind: TagKind) -> Self {
        let address = line.to_string();
        Self {
            name: name.into(),
            file: file.into(),
            fields: HashMap::from([(TagField::Line, address.clone())]),
            address,
            kind,
        }
    }

    pub fn with_field(mut self, field: TagField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn field(&self, field: TagField) -> Option<&str> {
        self.fields
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Fields with a value, ordered by key.
    pub fn present_fields(&self) -> Vec<(TagField, &str)> {
        let mut fields: Vec<(TagField, &str)> = self
            .fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        fields.sort_by_key(|(k, _)| k.as_str());
        fields
    }

    /// Render as `name<TAB>file<TAB>address;"<TAB>kind<TAB>key:value...`.
    ///
    /// Empty fields are dropped and the remaining `key:value` tokens are
    /// sorted by their full text.
    pub fn render_line(&self) -> String {
        let mut b = String::with_capacity(self.name.len() + self.file.len() + 32);

        b.push_str(&self.name);
        b.push('\t');
        b.push_str(&self.file);
        b.push('\t');
        b.push_str(&self.address);
        b.push_str(";\"\t");
        b.push(self.kind.code());
        b.push('\t');

        let mut fields: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}:{}", k.as_str(), v))
            .collect();
        fields.sort();
        b.push_str(&fields.join("\t"));

        b
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_carries_line_field() {
        let tag = Tag::new("Add", "math.src", 10, TagKind::Function);
        assert_eq!(tag.address, "10");
        assert_eq!(tag.field(TagField::Line), Some("10"));
    }

    #[test]
    fn test_render_function_line() {
        let tag = Tag::new("Add", "math.src", 10, TagKind::Function)
            .with_field(TagField::Signature, "(a,b int) int");
        assert_eq!(
            tag.render_line(),
            "Add\tmath.src\t10;\"\tf\tline:10\tsignature:(a,b int) int"
        );
        assert_eq!(tag.to_string(), tag.render_line());
    }

    #[test]
    fn test_render_sorts_and_skips_empty_fields() {
        let tag = Tag::new("Len", "list.src", 42, TagKind::Method)
            .with_field(TagField::Signature, "()")
            .with_field(TagField::ReceiverType, "List")
            .with_field(TagField::Access, "public")
            .with_field(TagField::TypeField, "int")
            .with_field(TagField::InterfaceType, "");

        let line = tag.render_line();
        assert!(!line.contains("ntype"));

        let tokens: Vec<&str> = line.split('\t').skip(4).collect();
        assert_eq!(
            tokens,
            vec!["access:public", "ctype:List", "line:42", "signature:()", "type:int"]
        );
        let mut sorted = tokens.clone();
        sorted.sort();
        assert_eq!(tokens, sorted);
    }

    #[test]
    fn test_render_is_independent_of_insertion_order() {
        let a = Tag::new("x", "f", 1, TagKind::Variable)
            .with_field(TagField::TypeField, "int")
            .with_field(TagField::Access, "private");
        let b = Tag::new("x", "f", 1, TagKind::Variable)
            .with_field(TagField::Access, "private")
            .with_field(TagField::TypeField, "int");
        assert_eq!(a.render_line(), b.render_line());
    }

    #[test]
    fn test_present_fields_skip_empty() {
        let tag = Tag::new("T", "t.src", 3, TagKind::Type)
            .with_field(TagField::TypeField, "struct")
            .with_field(TagField::Access, "");
        let fields = tag.present_fields();
        assert_eq!(
            fields,
            vec![(TagField::Line, "3"), (TagField::TypeField, "struct")]
        );
        assert_eq!(tag.field(TagField::Access), None);
    }
}
