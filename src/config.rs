//! Runtime configuration, read from the environment (and `.env` when present).

use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::ai::DEFAULT_ENDPOINT;

pub const PRODUCTION_API_BASE_URL: &str = "https://your-api-domain.com";
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub ai_endpoint: String,
    /// `None` means the platform default storage directory.
    pub data_dir: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url().to_string(),
            ai_endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: None,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read `VIDLINK_*` variables over the defaults.
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("ignoring unreadable .env file: {err}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_base_url: non_empty("VIDLINK_API_BASE_URL").unwrap_or(defaults.api_base_url),
            ai_endpoint: non_empty("VIDLINK_AI_ENDPOINT").unwrap_or(defaults.ai_endpoint),
            data_dir: non_empty("VIDLINK_DATA_DIR").map(PathBuf::from),
            log_level: non_empty("VIDLINK_LOG")
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }
}

/// Release builds talk to the production backend, debug builds to a local one.
pub const fn default_api_base_url() -> &'static str {
    if cfg!(debug_assertions) {
        LOCAL_API_BASE_URL
    } else {
        PRODUCTION_API_BASE_URL
    }
}
