/// Configuration system for vizsift.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::VizsiftConfig::default()`]
/// 2. **User global config** — `~/.vizsift/config.toml`
/// 3. **Project local config** — `.vizsift.toml` in the current working directory
/// 4. **Environment variables** — `VIZSIFT_*` overrides (highest precedence)
///
/// Missing sections in a TOML file fall back to built-in values. Library
/// callers that never load config get the defaults through
/// [`crate::generate_visualizations`].
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::VizsiftConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> VizsiftConfig {
    let mut config = VizsiftConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. Malformed files are ignored so a typo never stops
/// charts from being produced.
fn load_toml_file(path: Option<PathBuf>) -> Option<VizsiftConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.vizsift`, home of the global config and the pipeline log.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vizsift"))
}

fn global_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".vizsift.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `VIZSIFT_LOG` — pipeline log on/off (`1`/`true`/`yes`/`on`)
/// - `VIZSIFT_ADDR` — listen address for `vizsift serve`
/// - `VIZSIFT_MAX_METRICS` — metric cards per response
/// - `VIZSIFT_PIE_THRESHOLD` — pie dominance threshold (0.0–1.0)
fn apply_env_overrides(config: &mut VizsiftConfig) {
    if let Ok(val) = std::env::var("VIZSIFT_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("VIZSIFT_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("VIZSIFT_MAX_METRICS")
        && let Ok(n) = val.parse::<usize>()
    {
        config.selector.max_metrics = n;
    }
    if let Ok(val) = std::env::var("VIZSIFT_PIE_THRESHOLD")
        && let Some(threshold) = parse_threshold(&val)
    {
        config.selector.pie_dominance_threshold = threshold;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a share in `0.0..=1.0`.
fn parse_threshold(val: &str) -> Option<f64> {
    val.trim()
        .parse::<f64>()
        .ok()
        .filter(|t| (0.0..=1.0).contains(t))
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.vizsift/config.toml`.
///
/// Creates the `~/.vizsift/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.vizsift/ directory")?;
    }

    fs::write(&path, VizsiftConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
