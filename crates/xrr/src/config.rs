use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use xrr_settings::XrrSettings;

use crate::cli::GlobalArgs;

const DEFAULT_CONFIG_FILE: &str = "xrr.toml";

/// Settings file (explicit, else `xrr.toml` if present, else defaults) with
/// command-line flags applied on top.
pub fn resolve_settings(global: &GlobalArgs) -> Result<XrrSettings> {
    let mut settings = match &global.config {
        Some(path) => load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load(Path::new(DEFAULT_CONFIG_FILE))?,
        None => XrrSettings::default(),
    };
    apply_flags(&mut settings, global);
    settings.validate().context("Invalid command-line option")?;
    Ok(settings)
}

fn load(path: &Path) -> Result<XrrSettings> {
    debug!(path = %path.display(), "loading settings");
    XrrSettings::from_file(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn apply_flags(settings: &mut XrrSettings, global: &GlobalArgs) {
    if let Some(distance) = global.distance {
        settings.distance = distance;
    }
    if let Some(metric) = global.metric {
        settings.metric = metric;
    }
    if let Some(format) = global.format {
        settings.format = format;
    }
    if let Some(decimals) = global.decimals {
        settings.decimals = decimals;
    }
    if global.threads.is_some() {
        settings.threads = global.threads;
    }
}
