//! eventmap configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EventMapError, EventMapResult};
use crate::query::DateFilter;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RESULTS: u32 = 10;
static DEFAULT_LOG_LEVEL: &str = "warn";

/// Overrides `server_url` from the config file.
pub const SERVER_URL_ENV: &str = "EVENTMAP_SERVER_URL";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/eventmap/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMapConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_results")]
    pub default_results: u32,

    /// Token or short name, e.g. "date:weekend" or "weekend".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_date_filter: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EventMapConfig {
    fn default() -> Self {
        EventMapConfig {
            server_url: default_server_url(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_results: DEFAULT_RESULTS,
            default_date_filter: None,
            log_level: default_log_level(),
        }
    }
}

impl EventMapConfig {
    pub fn config_path() -> EventMapResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventMapError::Config("Could not determine config directory".into()))?
            .join("eventmap");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    pub fn load() -> EventMapResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.server_url = url,
            _ => {}
        }
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> EventMapResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: EventMapConfig = toml::from_str(&content)
            .map_err(|e| EventMapError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EventMapResult<()> {
        if self.default_results == 0 {
            return Err(EventMapError::Config("default_results must be positive".into()));
        }
        self.date_filter()?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn date_filter(&self) -> EventMapResult<Option<DateFilter>> {
        self.default_date_filter
            .as_deref()
            .map(str::parse::<DateFilter>)
            .transpose()
            .map_err(|e| EventMapError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventMapResult<()> {
        let contents = format!(
            "\
# eventmap configuration

# Events backend:
# server_url = \"{DEFAULT_SERVER_URL}\"

# Seconds before a backend request is abandoned:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Results per search (10, 20 or 30):
# default_results = {DEFAULT_RESULTS}

# Date window for searches (today, tomorrow, week, weekend, next_week, month, next_month):
# default_date_filter = \"weekend\"

# Log filter when RUST_LOG is not set:
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventMapError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventMapError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
