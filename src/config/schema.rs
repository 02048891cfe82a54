use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OWNER: &str = "local";

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// owner: alice
/// store_path: /home/alice/valuations.json
/// save_results: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Owner id stamped on every result (default: "local")
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Where saved valuations live (default: ~/.config/startup-valuator/valuations.json)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Persist results after `calculate` (default: true)
    #[serde(default = "default_save_results")]
    pub save_results: bool,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_save_results() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            store_path: None,
            save_results: default_save_results(),
        }
    }
}

impl Config {
    /// Store path, falling back to the default location
    pub fn effective_store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(crate::store::get_store_path)
    }
}
