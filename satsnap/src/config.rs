use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default = "default_variable_name")]
    pub variable_name: String,

    #[serde(default = "default_epoch_key")]
    pub epoch_key: String,

    #[serde(default = "default_unknown_owner")]
    pub unknown_owner: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rolling log files are only written when this is set
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data0.js")
}

fn default_variable_name() -> String {
    "data0".to_string()
}

fn default_epoch_key() -> String {
    "_epoch".to_string()
}

fn default_unknown_owner() -> String {
    "?".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            variable_name: default_variable_name(),
            epoch_key: default_epoch_key(),
            unknown_owner: default_unknown_owner(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl SnapshotConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: SnapshotConfig = toml::from_str(content)?;
        Ok(config)
    }
}
