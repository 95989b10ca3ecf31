//! Client configuration.
//!
//! Read once at startup from `<config dir>/vetus/config.json`. Every field has
//! a default, so a partial file (or no file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// How much email content the backend feeds the model when answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    /// Thread summaries only.
    #[default]
    Summary,
    /// Full email bodies.
    Full,
    /// Summaries plus selected bodies.
    Hybrid,
}

impl ContextMode {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Full => "full",
            Self::Hybrid => "hybrid",
        }
    }
}

/// Process-wide client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the archive backend.
    pub api_base_url: String,
    /// Context mode sent with every assistant question.
    pub context_mode: ContextMode,
    /// Model used to rewrite questions into search queries.
    pub rewrite_model: String,
    /// Maximum hits per lookup; backend default when unset.
    pub top_k: Option<u32>,
    /// Minimum hit score percentage; backend default when unset.
    pub min_score: Option<f64>,
    /// Evict the oldest staged documents beyond this many; unbounded when unset.
    pub staging_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            context_mode: ContextMode::Summary,
            rewrite_model: "llama3.1-12k:8b".to_string(),
            top_k: None,
            min_score: None,
            staging_capacity: None,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vetus")
            .join("config.json")
    }

    /// Reads a configuration file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        if config.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Reads a configuration file, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => {
                info!("Configuration loaded from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring configuration at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
