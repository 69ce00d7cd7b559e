//! The tags, triples and graph commands.

use crate::Tag;
use crate::cli::InputArgs;
use crate::config::Settings;
use crate::error::TagResult;
use crate::fields::{parse_extra_symbols, parse_fields};
use crate::input::{base_dir, collect_names, load_tags, make_relative};
use crate::pipeline::{TagPipeline, write_lines, write_output};

/// Validated flags plus every tag that could be read.
fn load_batch(
    input: &InputArgs,
    settings: &Settings,
    sort: bool,
) -> TagResult<(TagPipeline, Vec<Tag>)> {
    let field_set = parse_fields(&input.fields)?;
    let symbol_set = parse_extra_symbols(&input.extra)?;
    let pipeline = TagPipeline::new(
        field_set.merged(&symbol_set),
        settings.fields.language.clone(),
        sort,
    );

    let names = collect_names(input.files.clone(), input.list.as_deref(), input.recurse)?;

    let relative = input.relative || settings.output.relative;
    let silent = input.silent || settings.output.silent;
    let basedir = if relative {
        Some(base_dir(input.output.as_deref())?)
    } else {
        None
    };

    let mut tags = Vec::new();
    for name in &names {
        match load_tags(name) {
            Ok(mut batch) => {
                if let Some(base) = &basedir {
                    make_relative(&mut batch, base)?;
                }
                tags.extend(batch);
            }
            Err(e) => {
                tracing::debug!("skipping {}: {e}", name.display());
                if !silent {
                    eprintln!("{e}\n");
                }
            }
        }
    }

    tracing::info!("loaded {} tags from {} files", tags.len(), names.len());
    Ok((pipeline, tags))
}

pub fn run_tags(input: &InputArgs, sort: Option<bool>, settings: &Settings) -> TagResult<()> {
    let sort = sort.unwrap_or(settings.output.sort);
    let (pipeline, tags) = load_batch(input, settings, sort)?;
    let lines = pipeline.tag_lines(tags);
    write_lines(&lines, input.output.as_deref())
}

pub fn run_triples(input: &InputArgs, settings: &Settings) -> TagResult<()> {
    let (pipeline, tags) = load_batch(input, settings, false)?;
    let lines = pipeline.triple_lines(tags)?;
    write_lines(&lines, input.output.as_deref())
}

pub fn run_graph(input: &InputArgs, settings: &Settings) -> TagResult<()> {
    let (pipeline, tags) = load_batch(input, settings, false)?;
    let graph = pipeline.graph(tags);
    let mut json = serde_json::to_string_pretty(&graph)?;
    json.push('\n');
    write_output(&json, input.output.as_deref())
}
