use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "FLATSOCIAL_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
}

/// Endpoints of the chain node and content stores.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct ConnectionConfig {
    pub substrate_node_url: String,
    pub ipfs_node_url: String,
    #[serde(default)]
    pub ipfs_admin_node_url: Option<String>,
    #[serde(default)]
    pub offchain_url: Option<String>,
}

impl ConnectionConfig {
    /// Reads `FLATSOCIAL_*` variables, loading a `.env` file first when there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if e.not_found() {
                debug!("No .env file found");
            } else {
                return Err(e.into());
            }
        }

        envy::prefixed(ENV_PREFIX)
            .from_env()
            .map_err(ConfigError::from)
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, ConnectionConfig};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = ConnectionConfig::from_vars(vars(&[
            ("FLATSOCIAL_SUBSTRATE_NODE_URL", "ws://127.0.0.1:9944"),
            ("FLATSOCIAL_IPFS_NODE_URL", "http://127.0.0.1:8080"),
            ("FLATSOCIAL_OFFCHAIN_URL", "http://127.0.0.1:3001"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            ConnectionConfig {
                substrate_node_url: "ws://127.0.0.1:9944".to_owned(),
                ipfs_node_url: "http://127.0.0.1:8080".to_owned(),
                ipfs_admin_node_url: None,
                offchain_url: Some("http://127.0.0.1:3001".to_owned()),
            }
        );
    }

    #[test]
    fn missing_node_url_is_an_error() {
        let result = ConnectionConfig::from_vars(vars(&[(
            "FLATSOCIAL_IPFS_NODE_URL",
            "http://127.0.0.1:8080",
        )]));

        assert!(matches!(result, Err(ConfigError::Envy(_))));
    }
}
