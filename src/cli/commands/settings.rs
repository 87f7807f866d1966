use anyhow::{Context, Result};
use compute::ForecastSettings;
use tracing::debug;

use crate::config::load_settings;

/// Renders settings as YAML.
pub fn render_settings(settings: &ForecastSettings) -> Result<String> {
    serde_yaml::to_string(settings).context("Failed to serialize settings")
}

/// Prints the effective settings, after file and environment overrides.
pub fn print_settings(settings_path: Option<&str>) -> Result<()> {
    let settings = load_settings(settings_path)?;
    debug!("Printing settings with {} profiles", settings.profiles.len());
    println!("{}", render_settings(&settings)?);
    Ok(())
}
