//! Record-type specific WHOIS parsers.
//!
//! The IANA root database and domain registries use different layouts, so
//! each record type gets its own parser. A parser maps blank-line-delimited
//! line groups into normalized fields, then assembles those fields into the
//! fixed output shape for its record type.

mod domain;
mod root;

use std::net::IpAddr;

use tracing::debug;

use super::fields::FormattedGroup;
use super::lines::{group_lines, LineGroup};
use super::patterns::Classifier;
use super::record::{NameserverEntry, ParsedRecord};
use crate::dns::HostResolver;
pub use domain::DomainParser;
pub use root::RootParser;

/// Banner that opens every response from the IANA root WHOIS server.
pub const IANA_BANNER: &str = "% IANA WHOIS server";

/// Which output shape a raw response is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Root,
    Whois,
}

impl RecordKind {
    /// Root records are recognized by the IANA banner at the very start of
    /// the text; everything else is a domain record.
    pub fn detect(raw: &str) -> Self {
        if raw.starts_with(IANA_BANNER) {
            RecordKind::Root
        } else {
            RecordKind::Whois
        }
    }
}

/// Read-only inputs shared by every stage of one parse.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub classifier: &'a Classifier,
    /// Set only when nameserver resolution is enabled.
    pub resolver: Option<&'a dyn HostResolver>,
    pub parse_billing_contact: bool,
    pub include_raw_text: bool,
}

/// Trait for parsers of one WHOIS record type.
pub trait RecordParser: Send + Sync {
    /// Lines starting with this marker are comments and are dropped.
    fn comment_marker(&self) -> &str;

    /// Maps line groups to normalized fields.
    fn format_groups(&self, groups: &[LineGroup], ctx: &ParseContext<'_>) -> Vec<FormattedGroup>;

    /// Builds the output record from formatted groups and classifier results.
    fn assemble(&self, raw: &str, groups: &[FormattedGroup], ctx: &ParseContext<'_>)
        -> ParsedRecord;

    /// Runs grouping, field mapping and assembly over `raw`.
    fn parse(&self, raw: &str, ctx: &ParseContext<'_>) -> ParsedRecord {
        let lines = group_lines(raw, self.comment_marker());
        let formatted = self.format_groups(&lines, ctx);
        debug!(
            groups = lines.len(),
            formatted = formatted.len(),
            "Mapped line groups"
        );
        self.assemble(raw, &formatted, ctx)
    }
}

/// Returns the parser for a record kind.
pub fn parser_for(kind: RecordKind) -> &'static dyn RecordParser {
    static ROOT: RootParser = RootParser;
    static DOMAIN: DomainParser = DomainParser;

    match kind {
        RecordKind::Root => &ROOT,
        RecordKind::Whois => &DOMAIN,
    }
}

/// Builds a nameserver entry from a `<host> [<ip> ...]` line.
///
/// The first token is the host; later tokens fill `ipv4`/`ipv6` by address
/// family, first of each kind wins. Tokens that are not addresses are ignored.
fn nameserver_from_line(line: &str) -> Option<NameserverEntry> {
    let mut tokens = line.split_whitespace();
    let host = tokens.next()?.to_lowercase();

    let mut entry = NameserverEntry {
        host,
        ipv4: None,
        ipv6: None,
    };

    for token in tokens {
        match token.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) if entry.ipv4.is_none() => entry.ipv4 = Some(ip.to_string()),
            Ok(IpAddr::V6(ip)) if entry.ipv6.is_none() => entry.ipv6 = Some(ip.to_string()),
            Ok(_) => {}
            Err(_) => debug!(token = %token, "Ignoring non-address nameserver token"),
        }
    }

    Some(entry)
}

/// Fills in the address of `entry` from `resolver`, if any.
///
/// A failed lookup leaves both address fields null.
fn resolve_nameserver(
    mut entry: NameserverEntry,
    resolver: Option<&dyn HostResolver>,
) -> NameserverEntry {
    let Some(resolver) = resolver else {
        return entry;
    };

    match resolver.resolve(&entry.host) {
        Some(IpAddr::V4(ip)) => entry.ipv4 = Some(ip.to_string()),
        Some(IpAddr::V6(ip)) => entry.ipv6 = Some(ip.to_string()),
        None => debug!(host = %entry.host, "Nameserver left unresolved"),
    }

    entry
}
