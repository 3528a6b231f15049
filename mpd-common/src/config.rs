//! Configuration loading and root folder resolution
//!
//! Resolution order for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are handled together by the binary's argument parser; this
//! module owns the TOML file and the defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user configuration directory and data directory
pub const APP_DIR_NAME: &str = "mpd";
/// Config file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "mpd-server.toml";
/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "market_pulse.db";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8001";
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";
pub const DEFAULT_BRAND_CONTEXT: &str =
    "Kalyan Jewellers - Premium jewelry brand focusing on traditional and contemporary designs";

/// Contents of `mpd-server.toml`
///
/// Every key is optional; missing keys take the compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    pub database_max_lock_wait_ms: Option<u64>,
    pub logging: LoggingConfig,
    pub ai: AiConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// External text-generation service settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Upper bound on the generated response size
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request-level bound on one generation call
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AiConfig {
    /// API key if one is set and non-blank
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Brand context used when a content request does not supply one
    pub default_brand_context: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_brand_context: DEFAULT_BRAND_CONTEXT.to_string(),
        }
    }
}

impl TomlConfig {
    pub fn bind_addr_or_default(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
    }

    pub fn cors_origins_or_default(&self) -> Vec<String> {
        self.cors_origins
            .clone()
            .unwrap_or_else(|| vec!["*".to_string()])
    }

    pub fn database_max_lock_wait_ms_or_default(&self) -> u64 {
        self.database_max_lock_wait_ms.unwrap_or(5000)
    }
}

/// Load the TOML config
///
/// An explicit path must exist. Without one, the platform config file is used
/// when present and defaults otherwise.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("No config file found, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    read_toml_config(&path)
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Platform config file location (`~/.config/mpd/mpd-server.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Root folder resolution
///
/// `override_path` carries the already-merged command-line/environment value.
pub fn resolve_root_folder(override_path: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    if let Some(path) = &toml.root_folder {
        return path.clone();
    }
    default_root_folder()
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./mpd_data"))
}

/// Database file inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}
