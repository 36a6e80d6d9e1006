pub mod config;
pub mod dns;
pub mod error;
pub mod output;
pub mod whois;

pub use config::ParserConfig;
pub use error::{GleanError, Result};

pub use dns::{DnsHostResolver, HostResolver};
pub use output::{Output, OutputFormat, RecordFormatter};
pub use whois::{Classifier, ParsedRecord, PatternCategory, PatternTable, WhoisParser};
