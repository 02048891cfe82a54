mod schema;

pub use schema::{Config, DEFAULT_OWNER};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the configured owner id
pub const ENV_OWNER_VAR: &str = "STARTUP_VALUATOR_OWNER";

/// Get the config directory path (~/.config/startup-valuator/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("startup-valuator")
}

/// Get the default config file path (~/.config/startup-valuator/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Owner id from STARTUP_VALUATOR_OWNER, if set and non-empty.
pub fn get_owner_from_env() -> Option<String> {
    std::env::var(ENV_OWNER_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    if config.owner.trim().is_empty() {
        anyhow::bail!("Invalid config in {}: owner must not be empty", config_path.display());
    }

    Ok(config)
}
