//! Configuration for the server and the study client
//!
//! Values come from an optional TOML file and are then overridden by
//! environment variables, so a deployment can keep secrets out of the file:
//!
//! ```toml
//! [server]
//! port = 3000
//!
//! [llm]
//! model = "gpt-3.5-turbo"
//!
//! [store]
//! kind = "remote"
//! endpoint = "https://cloud.appwrite.io/v1"
//! project_id = "study-buddy"
//! database_id = "main"
//! collection_id = "decks"
//!
//! [client]
//! api_url = "http://127.0.0.1:3000"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable pointing at the config file
pub const CONFIG_PATH_VAR: &str = "STUDYBUDDY_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("No LLM API key configured (set OPENAI_API_KEY or llm.api_key)")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub store: StoreConfig,
    pub client: ClientConfig,
}

/// Where the generation endpoint listens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat-completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (e.g. "https://api.openai.com/v1")
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// Cap on the completion length
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Which deck store backs the collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Hosted document database (Appwrite REST API)
    #[default]
    Remote,
    /// JSON file on this machine
    Local,
}

/// Deck collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// API endpoint of the document database (e.g. "https://cloud.appwrite.io/v1")
    pub endpoint: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub database_id: String,
    pub collection_id: String,
    /// Directory for the local store (defaults to the user data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Remote,
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            api_key: None,
            database_id: String::new(),
            collection_id: String::new(),
            data_dir: None,
            timeout_secs: 30,
        }
    }
}

/// How the study client reaches the generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Load from `path` (or the default location) and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_path(path) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("studybuddy").join("config.toml"))
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        Self::default_path().filter(|p| p.exists())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key).filter(|v| !v.is_empty()).map(|v| {
                log::debug!("{key} set from environment");
                v
            })
        };

        if let Some(v) = var("STUDYBUDDY_HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("STUDYBUDDY_PORT") {
            self.server.port = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "STUDYBUDDY_PORT".to_string(),
                value: v.clone(),
            })?;
        }
        if let Some(v) = var("STUDYBUDDY_API_URL") {
            self.client.api_url = v;
        }
        if let Some(v) = var("OPENAI_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = var("OPENAI_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = var("APPWRITE_ENDPOINT") {
            self.store.endpoint = v;
        }
        if let Some(v) = var("APPWRITE_PROJECT_ID") {
            self.store.project_id = v;
        }
        if let Some(v) = var("APPWRITE_API_KEY") {
            self.store.api_key = Some(v);
        }
        if let Some(v) = var("APPWRITE_DATABASE_ID") {
            self.store.database_id = v;
        }
        if let Some(v) = var("APPWRITE_COLLECTION_ID") {
            self.store.collection_id = v;
        }

        Ok(())
    }
}
