use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum FeedbricksError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Missing required '{param}' setting for network '{network}'")]
    MissingRequiredParam { network: String, param: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Malformed {network} response: {reason}")]
    MalformedResponse { network: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{0}")]
    Other(String),
}

impl FeedbricksError {
    pub fn malformed(network: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            network: network.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedbricksError>;
