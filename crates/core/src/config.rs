use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::FileFormat;
use crate::page::DEFAULT_MIN_QUESTION_LEN;
use crate::wait::WaitOptions;

fn default_config_version() -> String {
    "0.1.0".to_string()
}

fn default_highlight_duration_ms() -> u64 {
    500
}

fn default_wait_timeout_ms() -> u64 {
    5000
}

fn default_wait_interval_ms() -> u64 {
    50
}

fn default_min_question_len() -> usize {
    DEFAULT_MIN_QUESTION_LEN
}

/// Serializable helper settings.
///
/// Every field has a default, so an empty `{}` file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Schema/config version. This is about the config format, not the crate version.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    /// Reference dataset bundled with the helper (relative to the config file's directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<String>,
    /// How long a highlight indicator stays visible.
    #[serde(default = "default_highlight_duration_ms")]
    pub highlight_duration_ms: u64,
    /// How long to wait for a question to appear on the page.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
    #[serde(default = "default_wait_interval_ms")]
    pub wait_interval_ms: u64,
    /// Minimum trimmed length for page text to count as a question.
    #[serde(default = "default_min_question_len")]
    pub min_question_len: usize,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            dataset_path: None,
            highlight_duration_ms: default_highlight_duration_ms(),
            wait_timeout_ms: default_wait_timeout_ms(),
            wait_interval_ms: default_wait_interval_ms(),
            min_question_len: default_min_question_len(),
        }
    }
}

impl HelperConfig {
    pub fn with_dataset_path(mut self, path: impl Into<String>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }

    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new(
            Duration::from_millis(self.wait_timeout_ms),
            Duration::from_millis(self.wait_interval_ms),
        )
    }
}

/// Load a config file (JSON, or YAML for `.yaml`/`.yml`).
///
/// A relative `dataset_path` is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<HelperConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let mut config: HelperConfig = match FileFormat::from_path(path) {
        FileFormat::Yaml => {
            serde_yaml::from_str(&body).context("Failed to parse config YAML")?
        }
        FileFormat::Json => {
            serde_json::from_str(&body).context("Failed to parse config JSON")?
        }
    };

    if let (Some(dataset), Some(dir)) = (config.dataset_path.clone(), path.parent()) {
        if Path::new(&dataset).is_relative() {
            config.dataset_path = Some(dir.join(dataset).to_string_lossy().to_string());
        }
    }

    Ok(config)
}
