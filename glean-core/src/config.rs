//! Parser configuration.
//!
//! A [`ParserConfig`] is supplied once when a parser is built and never
//! changes afterwards. It can be assembled with the `with_*` builders or
//! loaded from a JSON document; every field is optional in the document.
//!
//! ```json
//! {
//!   "output_format": "json",
//!   "resolve_nameserver_ip": false,
//!   "parse_billing_contact": true,
//!   "include_raw_text": false,
//!   "resolve_timeout_ms": 2000,
//!   "patterns": { "available": ["no match.*"] }
//! }
//! ```
//!
//! A `patterns` object replaces the stock table as a whole; categories it
//! leaves out are empty.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dns::DEFAULT_TIMEOUT;
use crate::error::{GleanError, Result};
use crate::output::OutputFormat;
use crate::whois::PatternTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub output_format: OutputFormat,
    /// Look up an address for each domain nameserver.
    pub resolve_nameserver_ip: bool,
    /// Nest `billing_*` fields into a billing contact.
    pub parse_billing_contact: bool,
    /// Copy the raw response into the record's `raw` field.
    pub include_raw_text: bool,
    pub resolve_timeout_ms: u64,
    pub patterns: PatternTable,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            resolve_nameserver_ip: false,
            parse_billing_contact: false,
            include_raw_text: false,
            resolve_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            patterns: PatternTable::stock(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_nameserver_resolution(mut self, enabled: bool) -> Self {
        self.resolve_nameserver_ip = enabled;
        self
    }

    pub fn with_billing_contact(mut self, enabled: bool) -> Self {
        self.parse_billing_contact = enabled;
        self
    }

    pub fn with_raw_text(mut self, enabled: bool) -> Self {
        self.include_raw_text = enabled;
        self
    }

    /// Sets the timeout for each nameserver lookup.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolve_nameserver_ip && self.resolve_timeout_ms == 0 {
            return Err(GleanError::Config(
                "resolve_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
