//! Aggregation of a tag batch into finished output.
//!
//! All output is rendered in memory before anything is written, and file
//! output goes through a temporary file that is renamed into place, so a
//! failed run never leaves a truncated tags file behind.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

use crate::Tag;
use crate::emit::{Graph, render_graph_fragment, render_triples};
use crate::error::{TagError, TagResult};
use crate::fields::{FieldFlag, FieldSet};
use crate::types::{TagField, TagKind};

pub const FORMAT_VERSION: u32 = 2;
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROGRAM_URL: &str = env!("CARGO_PKG_REPOSITORY");
pub const AUTHOR_NAME: &str = "Codetags Contributors";
pub const AUTHOR_EMAIL: &str = "maintainers@codetags.dev";
pub const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Header lines written ahead of the tag lines.
pub fn meta_tags(sorted: bool) -> Vec<String> {
    vec![
        format!("!_TAG_FILE_FORMAT\t{FORMAT_VERSION}"),
        format!("!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted/", u8::from(sorted)),
        format!("!_TAG_PROGRAM_AUTHOR\t{AUTHOR_NAME}\t/{AUTHOR_EMAIL}/"),
        format!("!_TAG_PROGRAM_NAME\t{PROGRAM_NAME}"),
        format!("!_TAG_PROGRAM_URL\t{PROGRAM_URL}"),
        format!("!_TAG_PROGRAM_VERSION\t{PROGRAM_VERSION}\t/rustc {RUST_VERSION}/"),
    ]
}

/// Package and receiver qualified copies of each tag.
///
/// Every tag is followed by its copies, so arrival order is kept. The
/// package of a file is the first package tag seen for it.
pub fn with_extra_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut packages: HashMap<String, String> = HashMap::new();
    for tag in tags.iter().filter(|t| t.kind == TagKind::Package) {
        packages
            .entry(tag.file.clone())
            .or_insert_with(|| tag.name.clone());
    }

    let mut out = Vec::with_capacity(tags.len() * 2);
    for tag in tags {
        if tag.kind.is_namespace_reference() {
            out.push(tag);
            continue;
        }

        let receiver = tag.field(TagField::ReceiverType).map(str::to_string);
        let package = packages.get(&tag.file);

        let mut names = Vec::new();
        if let Some(pkg) = package {
            names.push(format!("{pkg}.{}", tag.name));
        }
        if let Some(recv) = &receiver {
            names.push(format!("{recv}.{}", tag.name));
            if let Some(pkg) = package {
                names.push(format!("{pkg}.{recv}.{}", tag.name));
            }
        }

        let extras: Vec<Tag> = names
            .into_iter()
            .map(|name| Tag {
                name,
                ..tag.clone()
            })
            .collect();
        out.push(tag);
        out.extend(extras);
    }
    out
}

/// Turns a tag batch into tags lines, triples or a graph.
#[derive(Debug, Clone)]
pub struct TagPipeline {
    fields: FieldSet,
    language: String,
    sort: bool,
}

impl TagPipeline {
    pub fn new(fields: FieldSet, language: impl Into<String>, sort: bool) -> Self {
        Self {
            fields,
            language: language.into(),
            sort,
        }
    }

    /// Apply the enabled field flags to a batch.
    pub fn prepare(&self, tags: Vec<Tag>) -> Vec<Tag> {
        let mut tags = if self.fields.includes(FieldFlag::ExtraTags) {
            with_extra_tags(tags)
        } else {
            tags
        };

        if self.fields.includes(FieldFlag::Language) {
            for tag in &mut tags {
                tag.fields.insert(TagField::Language, self.language.clone());
            }
        }
        tags
    }

    /// Header followed by one line per tag, sorted when requested.
    pub fn tag_lines(&self, tags: Vec<Tag>) -> Vec<String> {
        let tags = self.prepare(tags);
        let mut lines: Vec<String> = tags.par_iter().map(Tag::render_line).collect();
        if self.sort {
            lines.sort();
        }

        let mut output = meta_tags(self.sort);
        output.extend(lines);
        tracing::debug!("rendered {} tag lines (sorted: {})", tags.len(), self.sort);
        output
    }

    /// One JSON array per triple, three per tag, in arrival order.
    pub fn triple_lines(&self, tags: Vec<Tag>) -> TagResult<Vec<String>> {
        let tags = self.prepare(tags);
        let per_tag: Vec<Vec<String>> = tags
            .par_iter()
            .map(|tag| {
                render_triples(tag)
                    .iter()
                    .map(serde_json::to_string)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;
        Ok(per_tag.into_iter().flatten().collect())
    }

    /// The merged graph for the batch.
    pub fn graph(&self, tags: Vec<Tag>) -> Graph {
        let tags = self.prepare(tags);
        let fragments: Vec<_> = tags.par_iter().map(render_graph_fragment).collect();

        let mut graph = Graph::new();
        for fragment in fragments {
            graph.push(fragment);
        }
        tracing::debug!(
            "graph has {} nodes and {} links",
            graph.nodes.len(),
            graph.links.len()
        );
        graph
    }
}

/// Write `lines` to `output`, or stdout when it is absent or `-`.
pub fn write_lines(lines: &[String], output: Option<&Path>) -> TagResult<()> {
    let mut contents = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    write_output(&contents, output)
}

/// Temporary file in `dir` whose mode matches what a plain create of
/// `target` would give: the existing file's permissions when there is
/// one, otherwise 0o666 reduced by the umask.
fn output_tempfile(dir: &Path, target: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // open(2) applies the umask to the requested mode
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(meta) = std::fs::metadata(target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}

/// Write the whole of `contents` to `output`, replacing any existing file
/// atomically.
pub fn write_output(contents: &str, output: Option<&Path>) -> TagResult<()> {
    let Some(path) = output.filter(|p| *p != Path::new("-")) else {
        let stdout = Path::new("<stdout>");
        let write_error = |source| TagError::Write {
            path: stdout.to_path_buf(),
            source,
        };
        let mut out = std::io::stdout().lock();
        out.write_all(contents.as_bytes()).map_err(write_error)?;
        return out.flush().map_err(write_error);
    };

    let write_error = |source| TagError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = output_tempfile(dir, path).map_err(write_error)?;
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    tracing::info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
