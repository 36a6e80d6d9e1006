use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::parsers::{parser_for, ParseContext, RecordKind};
use super::patterns::Classifier;
use super::record::ParsedRecord;
use crate::config::ParserConfig;
use crate::dns::{DnsHostResolver, HostResolver};
use crate::error::{GleanError, Result};
use crate::output::{get_formatter, Output};

/// Turns raw WHOIS text into structured records.
///
/// Holds an immutable configuration and the pattern table compiled from it,
/// so one parser can be shared across threads and reused for any number of
/// responses.
#[derive(Clone)]
pub struct WhoisParser {
    config: ParserConfig,
    classifier: Classifier,
    resolver: Option<Arc<dyn HostResolver>>,
}

impl std::fmt::Debug for WhoisParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoisParser")
            .field("config", &self.config)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl WhoisParser {
    /// Builds a parser, compiling the configured pattern table.
    ///
    /// When nameserver resolution is enabled a [`DnsHostResolver`] is created
    /// with the configured timeout.
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config.patterns)?;

        let resolver = if config.resolve_nameserver_ip {
            let resolver = DnsHostResolver::with_timeout(config.resolve_timeout())?;
            Some(Arc::new(resolver) as Arc<dyn HostResolver>)
        } else {
            None
        };

        Ok(Self {
            config,
            classifier,
            resolver,
        })
    }

    /// Replaces the resolver used when nameserver resolution is enabled.
    pub fn with_resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Parses `raw` and renders it in the configured output format.
    pub fn parse(&self, raw: &str) -> Result<Output> {
        let record = self.parse_record(raw)?;
        get_formatter(self.config.output_format).format(&record)
    }

    /// Parses `raw` into a typed record.
    ///
    /// Fails with [`GleanError::EmptyInput`] for blank input and with
    /// [`GleanError::RateLimited`] when the server refused the query; every
    /// other irregularity leaves fields null instead of failing.
    #[instrument(skip(self, raw), fields(len = raw.len()))]
    pub fn parse_record(&self, raw: &str) -> Result<ParsedRecord> {
        if raw.trim().is_empty() {
            return Err(GleanError::EmptyInput);
        }

        if self.classifier.is_rate_limited(raw) {
            warn!("WHOIS response indicates rate limiting");
            return Err(GleanError::RateLimited);
        }

        let kind = RecordKind::detect(raw);
        debug!(kind = ?kind, "Detected record type");

        Ok(self.parse_as(kind, raw))
    }

    /// Parses `raw` as a root record, skipping input checks and detection.
    pub fn parse_root(&self, raw: &str) -> ParsedRecord {
        self.parse_as(RecordKind::Root, raw)
    }

    /// Parses `raw` as a domain record, skipping input checks and detection.
    pub fn parse_whois(&self, raw: &str) -> ParsedRecord {
        self.parse_as(RecordKind::Whois, raw)
    }

    fn parse_as(&self, kind: RecordKind, raw: &str) -> ParsedRecord {
        let resolver = if self.config.resolve_nameserver_ip {
            self.resolver.as_deref()
        } else {
            None
        };

        let ctx = ParseContext {
            classifier: &self.classifier,
            resolver,
            parse_billing_contact: self.config.parse_billing_contact,
            include_raw_text: self.config.include_raw_text,
        };

        parser_for(kind).parse(raw, &ctx)
    }
}
