//! Settings file loading and CLI overrides.

use crate::cli::Cli;
use anyhow::Context;
use roster::listing::ConsoleSettings;
use std::fs;

/// Read the settings file named on the command line (if any), then apply
/// flag overrides and validate the result.
pub fn load(cli: &Cli) -> anyhow::Result<ConsoleSettings> {
    let mut settings = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            ConsoleSettings::from_toml(&text)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => ConsoleSettings::default(),
    };
    apply_overrides(&mut settings, cli);
    settings.validate().context("invalid settings")?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn apply_overrides(settings: &mut ConsoleSettings, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        settings.api.base_url = url.clone();
    }
}
