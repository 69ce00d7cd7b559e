//! Recursive discovery of record files.
//!
//! Directory traversal honors `.gitignore` rules (also outside git
//! repositories) and skips hidden entries. Results are sorted by path so
//! unsorted output stays reproducible.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::{TagError, TagResult};

/// Extensions recognized as record files when recursing.
pub const RECORD_EXTENSIONS: &[&str] = &["jsonl", "json"];

fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RECORD_EXTENSIONS.contains(&ext))
}

/// Walk a directory and return every record file below it.
pub fn walk_dir(dir: &Path) -> TagResult<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(false)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| TagError::Walk {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && is_record_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("found {} record files under {}", files.len(), dir.display());
    Ok(files)
}

/// Expand directories into the record files they contain. Anything that
/// is not a readable directory is passed through; reading it later
/// reports the real error.
pub fn recurse_names(names: Vec<PathBuf>) -> TagResult<Vec<PathBuf>> {
    let mut ret = Vec::with_capacity(names.len());
    for name in names {
        if name.is_dir() {
            ret.extend(walk_dir(&name)?);
        } else {
            ret.push(name);
        }
    }
    Ok(ret)
}
