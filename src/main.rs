use clap::{CommandFactory, Parser};
use codetags::cli::{Cli, commands};
use codetags::{Settings, logging};

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => {
            logging::init_with_config(&settings.logging);
            settings
        }
        Err(e) => {
            logging::init();
            eprintln!("{e}");
            eprintln!("Using default configuration for now.");
            Settings::default()
        }
    };

    if let Err(e) = commands::run(cli.command, &settings) {
        eprintln!("{e}\n");
        if e.wants_usage() {
            eprintln!("{}", Cli::command().render_usage());
        }
        std::process::exit(e.exit_code());
    }
}
