//! Runtime configuration, read from JSON.
//!
//! ```json
//! {
//!   "cache_views_by_default": true,
//!   "logging": { "filter": "rxview=debug", "log_dir": "/tmp/rxview" }
//! }
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::logging::DEFAULT_FILTER;
use crate::view::host::set_default_cache_views;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RxConfig {
    /// Initial `cache_views` for hosts that do not choose one.
    #[serde(default)]
    pub cache_views_by_default: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Log to a daily-rolling file in this directory instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            log_dir: None,
            file_name: default_file_name(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_file_name() -> String {
    "rxview.log".to_string()
}

impl RxConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Applies the process-wide defaults. Logging is installed separately
    /// with [`crate::logging::init`].
    pub fn apply(&self) {
        set_default_cache_views(self.cache_views_by_default);
        tracing::debug!(
            cache_views_by_default = self.cache_views_by_default,
            "configuration applied"
        );
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
