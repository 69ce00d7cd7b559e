//! CLI argument parsing using clap.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Tags, triples and graphs from extracted declarations
#[derive(Parser, Debug)]
#[command(
    name = "codetags",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tags, triples and graphs from extracted declarations",
    long_about = "Turn declaration records (JSON Lines) into a tags file, semantic triples or a visualization graph.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input and output options shared by every output format.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Record files (JSON Lines) or, with -R, directories
    pub files: Vec<PathBuf>,

    /// Read record file names from FILE, or from stdin if FILE is "-"
    #[arg(short = 'L', value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Recurse into directories in the file list
    #[arg(short = 'R')]
    pub recurse: bool,

    /// Write output to FILE, or to stdout if FILE is "-"
    #[arg(short = 'f', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// File paths should be relative to the directory containing the output file
    #[arg(long = "tag-relative")]
    pub relative: bool,

    /// Do not produce any output on per-file errors
    #[arg(long)]
    pub silent: bool,

    /// Include selected extension fields (only +l)
    #[arg(long, default_value = "", hide_default_value = true)]
    pub fields: String,

    /// Include additional tags with package and receiver name prefixes (+q)
    #[arg(long, default_value = "", hide_default_value = true)]
    pub extra: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a tags file
    Tags {
        #[command(flatten)]
        input: InputArgs,

        /// Sort tags (overrides config)
        #[arg(long, value_name = "BOOL")]
        sort: Option<bool>,
    },

    /// Write subject-relation-object triples, one JSON array per line
    Triples {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a node/link graph as JSON
    Graph {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Create .codetags/settings.toml in the current directory
    Init {
        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// List supported languages
    ListLanguages,
}
