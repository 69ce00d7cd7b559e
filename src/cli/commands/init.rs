//! Init and Config commands.

use crate::config::Settings;
use crate::error::{TagError, TagResult};

/// Create `.codetags/settings.toml` in the current directory.
pub fn run_init(force: bool) -> TagResult<()> {
    let cwd = std::env::current_dir().map_err(TagError::BasePath)?;
    let path = Settings::init_config_file(&cwd, force)?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    Ok(())
}

/// Display the effective configuration.
pub fn run_config(settings: &Settings) -> TagResult<()> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    println!("{}", settings.to_toml()?);
    Ok(())
}
