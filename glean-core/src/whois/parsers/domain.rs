//! Parser for registry and registrar domain records.
//!
//! Only the first line group is mapped: it holds the registry summary block
//! in the ICANN layout and in most ccTLD layouts. Registrars that publish
//! contact or registrar details in later groups are not merged in.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{nameserver_from_line, resolve_nameserver, ParseContext, RecordParser};
use crate::whois::dates::parse_date;
use crate::whois::fields::{null_or_value, split_key_value, FormattedGroup};
use crate::whois::lines::LineGroup;
use crate::whois::record::{
    Address, ContactInfo, NameserverEntry, ParsedRecord, StatusEntry, WhoisData, WhoisRecord,
};

/// Keys that repeat within a group and are kept as ordered lists.
const LIST_KEYS: [&str; 3] = ["domain_status", "name_server", "nserver"];

const CREATED_KEYS: [&str; 2] = ["created_date", "creation_date"];
const UPDATED_KEYS: [&str; 2] = ["updated_date", "changed"];
const EXPIRATION_KEYS: [&str; 2] = [
    "registrar_registration_expiration_date",
    "registry_expiry_date",
];

/// A contact role and the key prefixes that select it, longest first.
struct Role {
    name: &'static str,
    prefix: &'static str,
    strip: &'static [&'static str],
}

const REGISTRANT: Role = Role {
    name: "registrant",
    prefix: "registrant",
    strip: &["registrant_"],
};

const ADMINISTRATIVE: Role = Role {
    name: "administrative",
    prefix: "admin",
    strip: &["administrative_", "administration_", "admin_"],
};

const TECHNICAL: Role = Role {
    name: "technical",
    prefix: "tech",
    strip: &["technical_", "technology_", "tech_"],
};

const BILLING: Role = Role {
    name: "billing",
    prefix: "billing",
    strip: &["billing_"],
};

/// Parser for domain records from registry and registrar WHOIS servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainParser;

impl DomainParser {
    pub fn new() -> Self {
        Self
    }

    /// Lower-cases a key and folds spaces and slashes to underscores.
    fn normalize_key(key: &str) -> String {
        key.replace([' ', '/'], "_").replace(':', "").to_lowercase()
    }

    fn role_for(key: &str, parse_billing_contact: bool) -> Option<&'static Role> {
        if key.starts_with(REGISTRANT.prefix) {
            Some(&REGISTRANT)
        } else if key.starts_with(ADMINISTRATIVE.prefix) {
            Some(&ADMINISTRATIVE)
        } else if key.starts_with(TECHNICAL.prefix) {
            Some(&TECHNICAL)
        } else if parse_billing_contact && key.starts_with(BILLING.prefix) {
            Some(&BILLING)
        } else {
            None
        }
    }

    fn format_group(group: &LineGroup, parse_billing_contact: bool) -> FormattedGroup {
        let mut formatted = FormattedGroup::new();

        for line in group {
            // A bare `Key:` line still names a field, just an empty one.
            let line = if line.ends_with(':') {
                format!("{} ", line)
            } else {
                line.clone()
            };

            let Some((key, value)) = split_key_value(&line) else {
                continue;
            };
            let key = Self::normalize_key(key);

            if LIST_KEYS.contains(&key.as_str()) {
                formatted.append(&key, value);
            } else if let Some(role) = Self::role_for(&key, parse_billing_contact) {
                let field = role
                    .strip
                    .iter()
                    .find_map(|prefix| key.strip_prefix(*prefix))
                    .unwrap_or(key.as_str());
                formatted.set_role_field(role.name, field, null_or_value(&value));
            } else {
                formatted.set(&key, value);
            }
        }

        formatted
    }

    fn contact(fields: Option<&BTreeMap<String, Option<String>>>) -> ContactInfo {
        let Some(fields) = fields else {
            return ContactInfo::default();
        };
        let get = |key: &str| {
            fields
                .get(key)
                .and_then(|value| value.as_deref())
                .and_then(null_or_value)
        };

        ContactInfo {
            name: get("name"),
            organization: get("organization"),
            address: Address {
                street: get("street"),
                city: get("city"),
                state_province: get("state_province"),
                postal_code: get("postal_code"),
                country: get("country"),
            },
            phone: get("phone"),
            phone_ext: get("phone_ext"),
            fax: get("fax"),
            fax_ext: get("fax_ext"),
            email: get("email"),
        }
    }

    /// Splits `<code> (<url>)` into its parts.
    fn status(value: &str) -> Option<StatusEntry> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        let entry = match value.split_once(char::is_whitespace) {
            Some((code, url)) => {
                let url = url.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')');
                StatusEntry {
                    code: code.to_string(),
                    url: null_or_value(url),
                }
            }
            None => StatusEntry {
                code: value.to_string(),
                url: None,
            },
        };
        Some(entry)
    }

    fn nameservers(group: &FormattedGroup, ctx: &ParseContext<'_>) -> Vec<NameserverEntry> {
        let name_servers = group.list("name_server");

        if !name_servers.is_empty() {
            return name_servers
                .iter()
                .map(|value| value.trim())
                .filter(|host| !host.is_empty())
                .map(|host| NameserverEntry {
                    host: host.to_lowercase(),
                    ipv4: None,
                    ipv6: None,
                })
                .map(|entry| resolve_nameserver(entry, ctx.resolver))
                .collect();
        }

        // ccTLD layout: `nserver: <host> [<ip> ...]`
        group
            .list("nserver")
            .iter()
            .filter_map(|line| nameserver_from_line(line))
            .map(|entry| {
                if entry.ipv4.is_none() && entry.ipv6.is_none() {
                    resolve_nameserver(entry, ctx.resolver)
                } else {
                    entry
                }
            })
            .collect()
    }

    /// Applies each present key in order, so later synonyms win.
    fn date(group: &FormattedGroup, keys: &[&str], current: &mut Option<DateTime<Utc>>) {
        for key in keys {
            if let Some(value) = group.single(key) {
                *current = parse_date(value);
            }
        }
    }
}

impl RecordParser for DomainParser {
    fn comment_marker(&self) -> &str {
        ">"
    }

    fn format_groups(&self, groups: &[LineGroup], ctx: &ParseContext<'_>) -> Vec<FormattedGroup> {
        groups
            .first()
            .map(|group| Self::format_group(group, ctx.parse_billing_contact))
            .into_iter()
            .collect()
    }

    fn assemble(
        &self,
        raw: &str,
        groups: &[FormattedGroup],
        ctx: &ParseContext<'_>,
    ) -> ParsedRecord {
        let mut domain = None;
        let mut data = WhoisData::default();

        if ctx.parse_billing_contact {
            data.contacts.billing = Some(ContactInfo::default());
        }

        for group in groups {
            if let Some(value) = group.single("domain_name") {
                domain = null_or_value(&value.to_lowercase());
            }
            if let Some(value) = group.single("dnssec") {
                data.dnssec = null_or_value(value);
            }
            if let Some(value) = group.single("registry_domain_id") {
                data.id = null_or_value(value);
            }

            Self::date(group, &CREATED_KEYS, &mut data.dates.created);
            Self::date(group, &UPDATED_KEYS, &mut data.dates.updated);
            Self::date(group, &EXPIRATION_KEYS, &mut data.dates.expiration);

            let registrar = &mut data.registrar;
            if let Some(value) = group.single("registrar_iana_id") {
                registrar.id = null_or_value(value);
            }
            if let Some(value) = group.single("registrar") {
                registrar.name = null_or_value(value);
            }
            if let Some(value) = group.single("registrar_abuse_contact_email") {
                registrar.abuse_contact.email = null_or_value(value);
            }
            if let Some(value) = group.single("registrar_abuse_contact_phone") {
                registrar.abuse_contact.phone = null_or_value(value);
            }
            if let Some(value) = group.single("registrar_whois_server") {
                registrar.whois = null_or_value(value);
                data.whois = null_or_value(value);
            }

            data.status
                .extend(group.list("domain_status").iter().filter_map(|s| Self::status(s)));

            data.contacts.registrant = Self::contact(group.role(REGISTRANT.name));
            data.contacts.administrative = Self::contact(group.role(ADMINISTRATIVE.name));
            data.contacts.technical = Self::contact(group.role(TECHNICAL.name));
            if ctx.parse_billing_contact {
                data.contacts.billing = Some(Self::contact(group.role(BILLING.name)));
            }

            data.nameservers.extend(Self::nameservers(group, ctx));
        }

        let classifier = ctx.classifier;
        ParsedRecord::Whois(WhoisRecord {
            domain,
            is_valid: classifier.is_valid(raw),
            is_reserved: classifier.is_reserved(raw),
            is_available: classifier.is_available(raw),
            data,
            raw: ctx.include_raw_text.then(|| raw.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::HostResolver;
    use crate::whois::patterns::{Classifier, PatternTable};
    use chrono::Datelike;
    use std::collections::HashMap;
    use std::net::IpAddr;

    const SAMPLE_GTLD_RESPONSE: &str = r#"   Domain Name: EXAMPLE.COM
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.iana.org
   Registrar URL: http://res-dom.iana.org
   Updated Date: 2024-08-14T07:01:34Z
   Creation Date: 1995-08-14T04:00:00Z
   Registry Expiry Date: 2025-08-13T04:00:00Z
   Registrar: RESERVED-Internet Assigned Numbers Authority
   Registrar IANA ID: 376
   Registrar Abuse Contact Email:
   Registrar Abuse Contact Phone:
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Domain Status: clientTransferProhibited (https://icann.org/epp#clientTransferProhibited)
   Domain Status: ok
   Name Server: A.IANA-SERVERS.NET
   Name Server: B.IANA-SERVERS.NET
   DNSSEC: signedDelegation
   URL of the ICANN Whois Inaccuracy Complaint Form: https://www.icann.org/wicf/
>>> Last update of whois database: 2024-09-01T10:00:00Z <<<

NOTICE: The expiration date displayed in this record is the date the
registrar's sponsorship of the domain name registration in the registry is
currently set to expire.
"#;

    const SAMPLE_REGISTRAR_RESPONSE: &str = r#"Domain Name: example.org
Creation Date: 2001-03-01T10:00:00Z
Created Date: 2000-01-01T00:00:00Z
Registrar Registration Expiration Date: 2030-03-01T10:00:00Z
Registrant Name: Jane Doe
Registrant Organization: Example Org
Registrant Street: 1 Main St
Registrant City: Springfield
Registrant State/Province: IL
Registrant Postal Code: 62701
Registrant Country: US
Registrant Phone: +1.5555550100
Registrant Phone Ext:
Registrant Email: jane@example.org
Admin Name: Admin Person
Administrative Contact Email: ignored@example.org
Tech Email: tech@example.org
Technical Phone: +1.5555550199
Billing Name: Billing Dept
Billing Email: billing@example.org
Name Server: NS1.EXAMPLE.ORG
Name Server: ns2.example.org
Name Server:

Registrant Fax: +1.5555550111
Name Server: NS3.EXAMPLE.ORG
"#;

    fn parse_with(
        raw: &str,
        parse_billing_contact: bool,
        resolver: Option<&dyn HostResolver>,
    ) -> WhoisRecord {
        let classifier = Classifier::new(&PatternTable::stock()).unwrap();
        let ctx = ParseContext {
            classifier: &classifier,
            resolver,
            parse_billing_contact,
            include_raw_text: false,
        };
        match DomainParser::new().parse(raw, &ctx) {
            ParsedRecord::Whois(record) => record,
            other => panic!("expected whois record, got {:?}", other),
        }
    }

    fn parse(raw: &str) -> WhoisRecord {
        parse_with(raw, false, None)
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(DomainParser::normalize_key("Domain Name"), "domain_name");
        assert_eq!(
            DomainParser::normalize_key("Registrant State/Province"),
            "registrant_state_province"
        );
        assert_eq!(DomainParser::normalize_key("Name Server:"), "name_server");
    }

    #[test]
    fn test_gtld_identity_and_classification() {
        let record = parse(SAMPLE_GTLD_RESPONSE);

        assert_eq!(record.domain.as_deref(), Some("example.com"));
        assert!(record.is_valid);
        assert!(!record.is_reserved);
        assert!(!record.is_available);
        assert_eq!(record.data.id.as_deref(), Some("2336799_DOMAIN_COM-VRSN"));
        assert_eq!(record.data.dnssec.as_deref(), Some("signedDelegation"));
    }

    #[test]
    fn test_gtld_registrar_block() {
        let record = parse(SAMPLE_GTLD_RESPONSE);
        let registrar = &record.data.registrar;

        assert_eq!(registrar.id.as_deref(), Some("376"));
        assert_eq!(
            registrar.name.as_deref(),
            Some("RESERVED-Internet Assigned Numbers Authority")
        );
        assert_eq!(registrar.whois.as_deref(), Some("whois.iana.org"));
        assert_eq!(record.data.whois.as_deref(), Some("whois.iana.org"));
        assert_eq!(registrar.abuse_contact.email, None);
        assert_eq!(registrar.abuse_contact.phone, None);
    }

    #[test]
    fn test_gtld_dates() {
        let record = parse(SAMPLE_GTLD_RESPONSE);
        let dates = &record.data.dates;

        assert_eq!(dates.created.unwrap().year(), 1995);
        assert_eq!(dates.updated.unwrap().year(), 2024);
        assert_eq!(dates.expiration.unwrap().year(), 2025);
    }

    #[test]
    fn test_status_code_and_url() {
        let record = parse(SAMPLE_GTLD_RESPONSE);
        let status = &record.data.status;

        assert_eq!(status.len(), 3);
        assert_eq!(status[0].code, "clientDeleteProhibited");
        assert_eq!(
            status[0].url.as_deref(),
            Some("https://icann.org/epp#clientDeleteProhibited")
        );
        assert!(status.contains(&StatusEntry {
            code: "clientTransferProhibited".to_string(),
            url: Some("https://icann.org/epp#clientTransferProhibited".to_string()),
        }));
        assert_eq!(status[2].code, "ok");
        assert_eq!(status[2].url, None);
    }

    #[test]
    fn test_duplicate_statuses_are_kept() {
        let raw = "Domain Status: ok\nDomain Status: ok\n";
        assert_eq!(parse(raw).data.status.len(), 2);
    }

    #[test]
    fn test_nameservers_lowercased_in_order() {
        let record = parse(SAMPLE_GTLD_RESPONSE);
        let hosts: Vec<&str> = record.data.nameservers.iter().map(|ns| ns.host.as_str()).collect();

        assert_eq!(hosts, ["a.iana-servers.net", "b.iana-servers.net"]);
        assert!(record.data.nameservers.iter().all(|ns| ns.ipv4.is_none() && ns.ipv6.is_none()));
    }

    #[test]
    fn test_later_date_synonym_wins() {
        let record = parse(SAMPLE_REGISTRAR_RESPONSE);
        let dates = &record.data.dates;

        assert_eq!(dates.created.unwrap().year(), 2001);
        assert_eq!(dates.expiration.unwrap().year(), 2030);
        assert_eq!(dates.updated, None);
    }

    #[test]
    fn test_registrant_contact() {
        let record = parse(SAMPLE_REGISTRAR_RESPONSE);
        let registrant = &record.data.contacts.registrant;

        assert_eq!(registrant.name.as_deref(), Some("Jane Doe"));
        assert_eq!(registrant.organization.as_deref(), Some("Example Org"));
        assert_eq!(registrant.address.street.as_deref(), Some("1 Main St"));
        assert_eq!(registrant.address.state_province.as_deref(), Some("IL"));
        assert_eq!(registrant.address.postal_code.as_deref(), Some("62701"));
        assert_eq!(registrant.address.country.as_deref(), Some("US"));
        assert_eq!(registrant.phone_ext, None);
        assert_eq!(registrant.email.as_deref(), Some("jane@example.org"));
    }

    #[test]
    fn test_role_prefix_variants() {
        let record = parse(SAMPLE_REGISTRAR_RESPONSE);
        let contacts = &record.data.contacts;

        assert_eq!(contacts.administrative.name.as_deref(), Some("Admin Person"));
        // `administrative_contact_email` strips to `contact_email`, not a contact field.
        assert_eq!(contacts.administrative.email, None);
        assert_eq!(contacts.technical.email.as_deref(), Some("tech@example.org"));
        assert_eq!(contacts.technical.phone.as_deref(), Some("+1.5555550199"));
    }

    #[test]
    fn test_only_first_group_is_mapped() {
        let record = parse(SAMPLE_REGISTRAR_RESPONSE);

        assert_eq!(record.data.contacts.registrant.fax, None);
        let hosts: Vec<&str> = record.data.nameservers.iter().map(|ns| ns.host.as_str()).collect();
        assert_eq!(hosts, ["ns1.example.org", "ns2.example.org"]);
    }

    #[test]
    fn test_billing_contact_only_when_enabled() {
        let record = parse_with(SAMPLE_REGISTRAR_RESPONSE, false, None);
        assert!(record.data.contacts.billing.is_none());

        let record = parse_with(SAMPLE_REGISTRAR_RESPONSE, true, None);
        let billing = record.data.contacts.billing.unwrap();
        assert_eq!(billing.name.as_deref(), Some("Billing Dept"));
        assert_eq!(billing.email.as_deref(), Some("billing@example.org"));
    }

    #[test]
    fn test_billing_present_even_without_data_when_enabled() {
        let record = parse_with("Domain Name: a.com\n", true, None);
        assert!(record.data.contacts.billing.unwrap().is_empty());
    }

    #[test]
    fn test_missing_contacts_are_all_null() {
        let record = parse("Domain Name: a.com\n");
        assert!(record.data.contacts.registrant.is_empty());
        assert!(record.data.contacts.administrative.is_empty());
        assert!(record.data.contacts.technical.is_empty());
    }

    #[test]
    fn test_nserver_fallback() {
        let raw = "Domain: example.de\nNserver: NS1.EXAMPLE.DE 192.0.2.1\nNserver: ns2.example.de\n";
        let record = parse(raw);
        let nameservers = &record.data.nameservers;

        assert_eq!(nameservers.len(), 2);
        assert_eq!(nameservers[0].host, "ns1.example.de");
        assert_eq!(nameservers[0].ipv4.as_deref(), Some("192.0.2.1"));
        assert_eq!(nameservers[1].ipv4, None);
    }

    #[test]
    fn test_nameserver_resolution() {
        let mut hosts: HashMap<String, IpAddr> = HashMap::new();
        hosts.insert("a.iana-servers.net".to_string(), "199.43.135.53".parse().unwrap());
        hosts.insert("b.iana-servers.net".to_string(), "2001:500:8d::53".parse().unwrap());

        let record = parse_with(SAMPLE_GTLD_RESPONSE, false, Some(&hosts));
        let nameservers = &record.data.nameservers;

        assert_eq!(nameservers[0].ipv4.as_deref(), Some("199.43.135.53"));
        assert_eq!(nameservers[0].ipv6, None);
        assert_eq!(nameservers[1].ipv4, None);
        assert_eq!(nameservers[1].ipv6.as_deref(), Some("2001:500:8d::53"));
    }

    #[test]
    fn test_available_response() {
        let record = parse("% no entries found for the domain foo.com\n\n");

        assert!(record.is_available);
        assert!(!record.is_reserved);
        assert_eq!(record.domain, None);
        assert!(record.data.status.is_empty());
    }
}
