//! Parser for the IANA root database.
//!
//! Example root response (abridged):
//! ```text
//! % IANA WHOIS server
//! % for more information on IANA, visit http://www.iana.org
//!
//! domain:       COM
//!
//! organisation: VeriSign Global Registry Services
//! address:      12061 Bluemont Way
//!
//! contact:      administrative
//! name:         Registry Customer Service
//! organisation: VeriSign Global Registry Services
//! e-mail:       info@verisign-grs.com
//!
//! nserver:      A.GTLD-SERVERS.NET 192.5.6.30 2001:503:a83e:0:0:0:2:30
//!
//! whois:        whois.verisign-grs.com
//!
//! status:       ACTIVE
//!
//! created:      1985-01-01
//! changed:      2023-12-07
//! ```

use tracing::debug;

use super::{nameserver_from_line, ParseContext, RecordParser};
use crate::whois::dates::parse_date;
use crate::whois::fields::{null_or_value, split_key_value, FormattedGroup};
use crate::whois::lines::LineGroup;
use crate::whois::record::{ParsedRecord, RootContact, RootData, RootRecord};

/// Keys that repeat within a group and are kept as ordered lists.
const LIST_KEYS: [&str; 4] = ["address", "nserver", "remarks", "ds-rdata"];

/// Parser for responses from the IANA root WHOIS server.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootParser;

impl RootParser {
    pub fn new() -> Self {
        Self
    }

    fn format_group(group: &LineGroup) -> FormattedGroup {
        let mut formatted = FormattedGroup::new();

        for line in group {
            let Some((key, value)) = split_key_value(line) else {
                continue;
            };
            let key = key.to_lowercase();

            if LIST_KEYS.contains(&key.as_str()) {
                formatted.append(&key, value);
            } else {
                formatted.set(&key, value);
            }
        }

        formatted
    }

    fn contact(group: &FormattedGroup) -> RootContact {
        RootContact {
            name: group.single("name").and_then(null_or_value),
            organization: group.single("organisation").and_then(null_or_value),
            address: group.list("address").to_vec(),
            phone: group.single("phone").and_then(null_or_value),
            fax: group.single("fax-no").and_then(null_or_value),
            email: group.single("e-mail").and_then(null_or_value),
        }
    }

    fn sponsor(group: &FormattedGroup) -> RootContact {
        RootContact {
            organization: group.single("organisation").and_then(null_or_value),
            address: group.list("address").to_vec(),
            ..RootContact::default()
        }
    }
}

impl RecordParser for RootParser {
    fn comment_marker(&self) -> &str {
        "%"
    }

    fn format_groups(&self, groups: &[LineGroup], _ctx: &ParseContext<'_>) -> Vec<FormattedGroup> {
        groups.iter().map(Self::format_group).collect()
    }

    fn assemble(
        &self,
        raw: &str,
        groups: &[FormattedGroup],
        ctx: &ParseContext<'_>,
    ) -> ParsedRecord {
        let mut domain = None;
        let mut data = RootData::default();

        for group in groups {
            if let Some(value) = group.single("domain") {
                domain = null_or_value(&value.to_lowercase());
            }
            if let Some(value) = group.single("status") {
                data.status = null_or_value(&value.to_lowercase());
            }
            if let Some(value) = group.single("whois") {
                data.whois = null_or_value(value);
            }
            if let Some(value) = group.single("created") {
                data.dates.created = parse_date(value);
            }
            if let Some(value) = group.single("changed") {
                data.dates.updated = parse_date(value);
            }

            if group.contains("organisation") {
                match group.single("contact").map(str::to_lowercase).as_deref() {
                    None => data.contacts.sponsor = Some(Self::sponsor(group)),
                    Some("administrative") => {
                        data.contacts.administrative = Some(Self::contact(group))
                    }
                    Some("technical") => data.contacts.technical = Some(Self::contact(group)),
                    Some(other) => debug!(role = %other, "Ignoring unknown root contact role"),
                }
            }

            data.nameservers.extend(
                group
                    .list("nserver")
                    .iter()
                    .filter_map(|line| nameserver_from_line(line)),
            );
        }

        ParsedRecord::Root(RootRecord {
            domain,
            is_valid: ctx.classifier.is_valid(raw),
            data,
            raw: ctx.include_raw_text.then(|| raw.to_string()),
        })
    }
}
