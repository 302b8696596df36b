//! Search configuration loading.
//!
//! Parameters come from built-in defaults, optionally replaced by a TOML
//! file given with `--config`, then adjusted by environment variables.

use anyhow::{Context, Result};
use ox_mcts::MctsConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variables that override individual fields.
pub const ENV_EXPLORATION: &str = "OX_EXPLORATION";
pub const ENV_BUDGET_FRACTION: &str = "OX_BUDGET_FRACTION";
pub const ENV_MAX_PLAYOUTS: &str = "OX_MAX_PLAYOUTS";

/// Load the search configuration.
///
/// An explicit `path` that cannot be read or parsed is an error; without a
/// path the defaults are used. Environment overrides are applied last and
/// the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<MctsConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading search config from {}", path.display());
            load_from_path(path)?
        }
        None => {
            debug!("No --config given, using built-in defaults");
            MctsConfig::default()
        }
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    config.validate().context("invalid search config")?;
    Ok(config)
}

/// Parse a TOML file into a config. Missing fields keep their defaults.
pub fn load_from_path(path: &Path) -> Result<MctsConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Apply overrides looked up through `var`.
///
/// Values that do not parse are logged and ignored.
pub fn apply_env_overrides<F>(mut config: MctsConfig, var: F) -> MctsConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = var(ENV_EXPLORATION) {
        match v.parse() {
            Ok(exploration) => config.exploration = exploration,
            Err(e) => warn!("Ignoring {}={}: {}", ENV_EXPLORATION, v, e),
        }
    }
    if let Some(v) = var(ENV_BUDGET_FRACTION) {
        match v.parse() {
            Ok(fraction) => config.budget_fraction = fraction,
            Err(e) => warn!("Ignoring {}={}: {}", ENV_BUDGET_FRACTION, v, e),
        }
    }
    if let Some(v) = var(ENV_MAX_PLAYOUTS) {
        match v.parse() {
            Ok(playouts) => config.max_playouts = Some(playouts),
            Err(e) => warn!("Ignoring {}={}: {}", ENV_MAX_PLAYOUTS, v, e),
        }
    }
    config
}
