//! `fledge config`: show the effective configuration.

use crate::{cli::ConfigCommands, config::AppConfig, error::CliResult, output::OutputManager};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => output.data(config.to_toml()?.trim_end())?,
        ConfigCommands::Path => output.data(&AppConfig::config_path().display().to_string())?,
    }
    Ok(())
}
