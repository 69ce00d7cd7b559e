//! Command implementations.

pub mod emit;
pub mod init;

use crate::cli::Commands;
use crate::config::Settings;
use crate::error::TagResult;

/// Dispatch a parsed command.
pub fn run(command: Commands, settings: &Settings) -> TagResult<()> {
    match command {
        Commands::Tags { input, sort } => emit::run_tags(&input, sort, settings),
        Commands::Triples { input } => emit::run_triples(&input, settings),
        Commands::Graph { input } => emit::run_graph(&input, settings),
        Commands::Init { force } => init::run_init(force),
        Commands::Config => init::run_config(settings),
        Commands::ListLanguages => {
            println!("{}", settings.fields.language);
            Ok(())
        }
    }
}
