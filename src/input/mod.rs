//! Tag record ingestion.
//!
//! Declarations arrive from an external scanner as JSON Lines, one object
//! per declaration:
//!
//! ```json
//! {"name": "Add", "file": "math.go", "line": 10, "kind": "f", "fields": {"signature": "(a, b int) int"}}
//! ```
//!
//! `kind` accepts either the one letter code or the label. Blank lines are
//! skipped.

pub mod walker;

use serde::Deserialize;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use crate::Tag;
use crate::error::{TagError, TagResult};
use crate::types::{TagField, TagKind};

pub use walker::{recurse_names, walk_dir};

/// Wire shape of one record.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagRecord {
    name: String,
    file: String,
    line: u32,
    kind: TagKind,
    #[serde(default)]
    fields: HashMap<TagField, String>,
}

impl TagRecord {
    fn into_tag(self) -> Result<Tag, String> {
        if self.line == 0 {
            return Err("line numbers start at 1".to_string());
        }
        if self.name.is_empty() {
            return Err("empty symbol name".to_string());
        }

        let mut tag = Tag::new(self.name, self.file, self.line, self.kind);
        for (field, value) in self.fields {
            // the line field always mirrors the address
            if field != TagField::Line {
                tag.fields.insert(field, value);
            }
        }
        Ok(tag)
    }
}

/// Decode every record from `reader`. `path` is only used in errors.
pub fn decode_records<R: Read>(reader: R, path: &Path) -> TagResult<Vec<Tag>> {
    let mut tags = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| TagError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let decode_error = |reason: String| TagError::Decode {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };
        let record: TagRecord = serde_json::from_str(&line).map_err(|e| decode_error(e.to_string()))?;
        tags.push(record.into_tag().map_err(decode_error)?);
    }
    Ok(tags)
}

/// Read and decode a record file.
pub fn load_tags(path: &Path) -> TagResult<Vec<Tag>> {
    let file = std::fs::File::open(path).map_err(|source| TagError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tags = decode_records(file, path)?;
    tracing::debug!("decoded {} records from {}", tags.len(), path.display());
    Ok(tags)
}

/// Read file names, one per line, from `list` or from stdin when it is `-`.
pub fn read_names(list: &Path) -> TagResult<Vec<PathBuf>> {
    let read_error = |source| TagError::Read {
        path: list.to_path_buf(),
        source,
    };

    let reader: Box<dyn BufRead> = if list == Path::new("-") {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(std::fs::File::open(list).map_err(read_error)?))
    };

    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(read_error)?;
        if !line.is_empty() {
            names.push(PathBuf::from(line));
        }
    }
    Ok(names)
}

/// Positional names plus any read from the `-L` list, expanded into
/// directories when `recurse` is set.
pub fn collect_names(
    mut names: Vec<PathBuf>,
    list: Option<&Path>,
    recurse: bool,
) -> TagResult<Vec<PathBuf>> {
    if let Some(list) = list {
        names.extend(read_names(list)?);
    }
    if recurse {
        names = recurse_names(names)?;
    }
    if names.is_empty() && list.is_none() {
        return Err(TagError::NoInput);
    }
    Ok(names)
}

/// Absolute form of the directory that will hold `output`.
pub fn base_dir(output: Option<&Path>) -> TagResult<PathBuf> {
    let dir = output
        .filter(|p| *p != Path::new("-"))
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::path::absolute(dir).map_err(TagError::BasePath)
}

/// Express `path` relative to the absolute directory `base`.
pub fn relative_to(path: &Path, base: &Path) -> TagResult<PathBuf> {
    let path = std::path::absolute(path).map_err(TagError::BasePath)?;
    let path = normalize(&path);
    let base = normalize(base);

    let common = path
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in base.components().skip(common) {
        rel.push("..");
    }
    for component in path.components().skip(common) {
        rel.push(component);
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Ok(rel)
}

/// Lexically resolve `.` and `..` in an absolute path.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Rewrite each tag's file path relative to `base`.
pub fn make_relative(tags: &mut [Tag], base: &Path) -> TagResult<()> {
    for tag in tags {
        let rel = relative_to(Path::new(&tag.file), base)?;
        tag.file = rel.to_string_lossy().into_owned();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_decode_records() {
        let input = r#"{"name":"main","file":"main.go","line":1,"kind":"p"}

{"name":"Add","file":"math.go","line":10,"kind":"function","fields":{"signature":"(a,b int) int","access":"public"}}
"#;
        let tags = decode_records(input.as_bytes(), Path::new("in.jsonl")).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind, TagKind::Package);
        assert_eq!(tags[1].name, "Add");
        assert_eq!(tags[1].address, "10");
        assert_eq!(tags[1].field(TagField::Line), Some("10"));
        assert_eq!(tags[1].field(TagField::Signature), Some("(a,b int) int"));
        assert_eq!(tags[1].field(TagField::Access), Some("public"));
    }

    #[test]
    fn test_line_field_follows_address() {
        let input = r#"{"name":"x","file":"x.go","line":3,"kind":"v","fields":{"line":"99"}}"#;
        let tags = decode_records(input.as_bytes(), Path::new("in.jsonl")).unwrap();
        assert_eq!(tags[0].field(TagField::Line), Some("3"));
    }

    #[test]
    fn test_decode_errors_carry_position() {
        let input = "{\"name\":\"ok\",\"file\":\"f\",\"line\":1,\"kind\":\"f\"}\n{\"name\":\"bad\",\"file\":\"f\",\"line\":2,\"kind\":\"struct\"}\n";
        match decode_records(input.as_bytes(), Path::new("in.jsonl")) {
            Err(TagError::Decode { path, line, .. }) => {
                assert_eq!(path, PathBuf::from("in.jsonl"));
                assert_eq!(line, 2);
            }
            other => panic!("expected decode error, got {other:?}"),
        }

        let zero = r#"{"name":"z","file":"f","line":0,"kind":"f"}"#;
        assert!(matches!(
            decode_records(zero.as_bytes(), Path::new("z.jsonl")),
            Err(TagError::Decode { line: 1, .. })
        ));

        let unknown = r#"{"name":"u","file":"f","line":1,"kind":"f","extra":true}"#;
        assert!(decode_records(unknown.as_bytes(), Path::new("u.jsonl")).is_err());
    }

    #[test]
    fn test_collect_names_from_list() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("files.txt");
        fs::write(&list, "a.jsonl\n\nb.jsonl\n").unwrap();

        let names = collect_names(vec![PathBuf::from("c.jsonl")], Some(&list), false).unwrap();
        assert_eq!(
            names,
            vec![
                PathBuf::from("c.jsonl"),
                PathBuf::from("a.jsonl"),
                PathBuf::from("b.jsonl"),
            ]
        );
    }

    #[test]
    fn test_collect_names_requires_input() {
        assert!(matches!(
            collect_names(Vec::new(), None, false),
            Err(TagError::NoInput)
        ));
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/work/project/out");
        assert_eq!(
            relative_to(Path::new("/work/project/src/lib.go"), base).unwrap(),
            PathBuf::from("../src/lib.go")
        );
        assert_eq!(
            relative_to(Path::new("/work/project/out/a.go"), base).unwrap(),
            PathBuf::from("a.go")
        );
        assert_eq!(
            relative_to(Path::new("/work/project/out/./x/../b.go"), base).unwrap(),
            PathBuf::from("b.go")
        );
    }

    #[test]
    fn test_base_dir_defaults_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(base_dir(None).unwrap(), std::path::absolute(".").unwrap());
        assert_eq!(base_dir(Some(Path::new("-"))).unwrap(), std::path::absolute(".").unwrap());
        assert_eq!(
            base_dir(Some(Path::new("out/tags"))).unwrap(),
            cwd.join("out")
        );
    }
}
