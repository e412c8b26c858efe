//! Client configuration loaded from environment variables.
//!
//! The backend base URL is the only required value; everything else has a
//! sensible default so the client can be constructed in one line.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Crescere REST API, e.g. `http://localhost:8000/api`.
    /// No trailing slash; paths passed to the client start with one.
    pub api_url: String,
    /// Where the durable session file lives.
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("CRESCERE_API_URL")
            .map_err(|_| ConfigError::Missing("CRESCERE_API_URL"))?
            .trim_end_matches('/')
            .to_string();

        let session_file = env::var("CRESCERE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Ok(Self {
            api_url,
            session_file,
        })
    }

    /// Construct a config pointing at an explicit base URL.
    ///
    /// Used by tests (pointing at an ephemeral mock server) and by embedders
    /// that manage their own configuration.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file: default_session_file(),
        }
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self::with_api_url("http://localhost:8000/api")
    }
}

fn default_session_file() -> PathBuf {
    env::temp_dir().join("crescere_session.json")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
