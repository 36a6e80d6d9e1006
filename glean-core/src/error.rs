use thiserror::Error;

use crate::whois::PatternCategory;

#[derive(Error, Debug)]
pub enum GleanError {
    #[error("No WHOIS data to parse")]
    EmptyInput,

    #[error("Rate limited: the WHOIS server refused further queries")]
    RateLimited,

    #[error("Invalid {category} pattern {pattern:?}: {source}")]
    InvalidPattern {
        category: PatternCategory,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("DNS resolver error: {0}")]
    Dns(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GleanError {
    /// Returns true when the response indicated the caller should back off.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GleanError::RateLimited)
    }
}

pub type Result<T> = std::result::Result<T, GleanError>;
