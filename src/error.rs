use thiserror::Error;

use crate::http_probe::result::ProbeResult;

/// Shown to the caller whenever the input cannot be turned into a probeable URL.
pub const INVALID_INPUT_HINT: &str =
    "Please enter a valid website domain. Examples: google.com, github.com, or just \"google\"";

/// Input errors. These are raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL: {input}")]
    InvalidUrl { input: String },

    #[error("Invalid domain: {url}")]
    InvalidDomain { url: String },
}

impl CheckError {
    /// Structured rejection for callers that render every outcome as a result.
    /// `MissingUrl` has none: there is nothing to attach it to.
    pub fn rejection(&self) -> Option<ProbeResult> {
        match self {
            CheckError::MissingUrl => None,
            CheckError::InvalidUrl { input } => Some(ProbeResult::rejected(
                input.clone(),
                "Invalid URL",
                INVALID_INPUT_HINT,
            )),
            CheckError::InvalidDomain { url } => Some(ProbeResult::rejected(
                url.clone(),
                "Invalid Domain",
                INVALID_INPUT_HINT,
            )),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
