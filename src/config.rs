use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const ENDPOINT_ENV: &str = "LEDGER_ENDPOINT";
pub const KEY_FILE_ENV: &str = "LEDGER_KEY_FILE";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:1204";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("ledger-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid endpoint {endpoint}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint {0} must use http or https")]
    Scheme(String),
}

/// Where and how the client talks to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL; operation paths are appended to it.
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve config: file (if any), then `LEDGER_ENDPOINT`, then explicit
    /// overrides. The result is validated.
    pub fn resolve(
        file: Option<&Path>,
        endpoint: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(env_endpoint) = std::env::var(ENDPOINT_ENV) {
            if !env_endpoint.trim().is_empty() {
                config.endpoint = env_endpoint;
            }
        }
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint.to_string();
        }
        if let Some(timeout_secs) = timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the endpoint and normalise it (trimmed, no trailing slash).
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&endpoint).map_err(|source| ConfigError::Endpoint {
            endpoint: endpoint.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(endpoint));
        }
        self.endpoint = endpoint;
        Ok(())
    }
}
