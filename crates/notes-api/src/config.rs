//! Configuration loading and management

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::guard::{AccessGuard, DEFAULT_API_KEY_HEADER};
use crate::store::{JsonFileStore, MemoryStore, NoteStore};

/// Main configuration for the notes service, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Request header that must carry the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Shared secret expected in `api_key_header`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Where notes are kept
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process memory only, lost on restart
    #[default]
    Memory,
    /// JSON document on disk
    File { path: PathBuf },
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key_header: default_api_key_header(),
            api_key: None,
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.json` from the config directory, falling back to defaults.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_file = config_path.as_ref().join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {:?}", config_file))?;
            tracing::info!("Loaded configuration from {:?}", config_file);
            Ok(config)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_file);
            Ok(Config::default())
        }
    }

    /// Build the access guard, refusing to run without a usable secret.
    pub fn access_guard(&self) -> Result<AccessGuard> {
        let secret = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => bail!("No API key configured; set X_API_KEY or api_key in config.json"),
        };
        if HeaderValue::from_str(secret).is_err() {
            bail!("API key contains characters that cannot be sent in an HTTP header");
        }

        AccessGuard::new(&self.api_key_header, secret)
            .with_context(|| format!("Invalid API key header name: {:?}", self.api_key_header))
    }
}

impl StoreConfig {
    /// Parse the `--store` flag: `memory`, or a path to a JSON file.
    pub fn from_arg(arg: &str) -> Self {
        if arg.eq_ignore_ascii_case("memory") {
            StoreConfig::Memory
        } else {
            StoreConfig::File {
                path: PathBuf::from(arg),
            }
        }
    }

    pub fn open(&self) -> Result<Arc<dyn NoteStore>> {
        match self {
            StoreConfig::Memory => {
                tracing::warn!("Using in-memory note store; notes will not survive a restart");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreConfig::File { path } => {
                let store = JsonFileStore::open(path)
                    .with_context(|| format!("Failed to open note store at {:?}", path))?;
                tracing::info!("Using JSON note store at {:?}", store.path());
                Ok(Arc::new(store))
            }
        }
    }
}
