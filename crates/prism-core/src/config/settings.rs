use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the configured service address.
pub const ENV_SERVICE_URL: &str = "PRISM_SERVICE_URL";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base address of the preset-generation service
    #[serde(default = "default_service_base_url")]
    pub service_base_url: String,

    /// Whether to ask the service for a style recommendation after an
    /// image is selected
    #[serde(default = "default_recommend")]
    pub recommend_on_select: bool,

    /// Toast display duration in milliseconds
    #[serde(default = "default_toast_ms")]
    pub toast_duration_ms: u64,
}

fn default_service_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_recommend() -> bool {
    true
}

fn default_toast_ms() -> u64 {
    4000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: default_service_base_url(),
            recommend_on_select: default_recommend(),
            toast_duration_ms: default_toast_ms(),
        }
    }
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective service address: the environment override wins, then the
    /// config file, then the default.
    #[must_use]
    pub fn effective_service_url(&self) -> String {
        std::env::var(ENV_SERVICE_URL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.service_base_url.clone())
    }
}
