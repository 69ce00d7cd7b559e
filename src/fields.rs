//! Parsing of the `--fields` and `--extra` option strings.
//!
//! Each option accepts exactly one literal token. Combining tokens in one
//! option string is rejected rather than guessed at.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{TagError, TagResult};

// currently only "+l" is supported (letter l, not the digit)
static FIELDS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+l$").unwrap());
static EXTRA_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+q$").unwrap());

/// Optional output behaviors switched on from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFlag {
    /// Attach the configured language to every tag.
    Language,
    /// Emit package and receiver qualified copies of each tag.
    ExtraTags,
}

/// Immutable set of enabled [`FieldFlag`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(HashSet<FieldFlag>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn includes(&self, flag: FieldFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of two independently parsed sets.
    pub fn merged(&self, other: &FieldSet) -> FieldSet {
        FieldSet(self.0.union(&other.0).copied().collect())
    }
}

impl FromIterator<FieldFlag> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldFlag>>(iter: I) -> Self {
        FieldSet(iter.into_iter().collect())
    }
}

fn parse_single(input: &str, pattern: &Regex, flag: FieldFlag) -> TagResult<FieldSet> {
    if input.is_empty() {
        return Ok(FieldSet::new());
    }
    if pattern.is_match(input) {
        return Ok(FieldSet::from_iter([flag]));
    }
    Err(TagError::InvalidFields(input.to_string()))
}

/// Parse the `--fields` value. Only `+l` is recognized.
pub fn parse_fields(fields: &str) -> TagResult<FieldSet> {
    parse_single(fields, &FIELDS_PATTERN, FieldFlag::Language)
}

/// Parse the `--extra` value. Only `+q` is recognized.
pub fn parse_extra_symbols(symbols: &str) -> TagResult<FieldSet> {
    parse_single(symbols, &EXTRA_PATTERN, FieldFlag::ExtraTags)
}
