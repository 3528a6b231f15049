//! Service configuration
//!
//! Command-line flags and environment variables are parsed together by clap;
//! whatever they leave unset falls through to the TOML file and then to the
//! compiled defaults in `mpd_common::config`.

use clap::Parser;
use mpd_common::config::{self as common_config, AiConfig, TomlConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for mpd-server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mpd-server")]
#[command(about = "Market Pulse Dashboard analysis service")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: <config dir>/mpd/mpd-server.toml)
    #[arg(short, long, env = "MPD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder holding the database file
    #[arg(short, long, env = "MPD_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "MPD_BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Allowed CORS origins ("*" allows any)
    #[arg(long, env = "MPD_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// API key for the text-generation service
    #[arg(long, env = "MPD_AI_API_KEY", hide_env_values = true)]
    pub ai_api_key: Option<String>,

    /// Model requested from the text-generation service
    #[arg(long, env = "MPD_AI_MODEL")]
    pub ai_model: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long)]
    pub log_level: Option<String>,

    /// Keep all data in memory (nothing survives a restart)
    #[arg(long)]
    pub in_memory: bool,
}

/// Where the database lives
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database: DatabaseLocation,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub max_lock_wait_ms: u64,
    pub default_brand_context: String,
    pub ai: AiConfig,
}

impl ServiceConfig {
    /// Merge parsed arguments over a loaded TOML config
    pub fn resolve(args: Args, toml: TomlConfig) -> Self {
        let database = if args.in_memory {
            DatabaseLocation::InMemory
        } else {
            let root = common_config::resolve_root_folder(args.root_folder.as_deref(), &toml);
            DatabaseLocation::File(common_config::database_path(&root))
        };

        let cors_origins = args
            .cors_origins
            .map(|origins| {
                origins
                    .into_iter()
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| toml.cors_origins_or_default());

        let mut ai = toml.ai.clone();
        if let Some(key) = args.ai_api_key {
            ai.api_key = Some(key);
        }
        if let Some(model) = args.ai_model {
            ai.model = model;
        }

        Self {
            database,
            bind_addr: args.bind_addr.unwrap_or_else(|| toml.bind_addr_or_default()),
            cors_origins,
            log_level: args.log_level.unwrap_or_else(|| toml.logging.level.clone()),
            max_lock_wait_ms: toml.database_max_lock_wait_ms_or_default(),
            default_brand_context: toml.content.default_brand_context.clone(),
            ai,
        }
    }

    /// Bound on one content-generation call
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai.timeout_secs)
    }
}
