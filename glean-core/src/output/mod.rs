mod json;
mod mapping;
mod native;
mod yaml;

pub use json::JsonFormatter;
pub use mapping::MappingFormatter;
pub use native::NativeFormatter;
pub use yaml::YamlFormatter;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::whois::ParsedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The typed [`ParsedRecord`].
    #[default]
    #[serde(alias = "object")]
    Native,
    /// A `serde_json::Value` tree with field order preserved.
    #[serde(alias = "array")]
    Mapping,
    /// Compact JSON text.
    Json,
    /// YAML text.
    #[serde(alias = "serialize")]
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "object" => Ok(OutputFormat::Native),
            "mapping" | "array" | "map" => Ok(OutputFormat::Mapping),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" | "serialize" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// A parsed record rendered in the configured [`OutputFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Native(ParsedRecord),
    Mapping(serde_json::Value),
    Text(String),
}

impl Output {
    pub fn as_record(&self) -> Option<&ParsedRecord> {
        match self {
            Output::Native(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&serde_json::Value> {
        match self {
            Output::Mapping(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<ParsedRecord> {
        match self {
            Output::Native(record) => Some(record),
            _ => None,
        }
    }
}

/// Final, pure rendering stage of the parse pipeline.
pub trait RecordFormatter {
    fn format(&self, record: &ParsedRecord) -> Result<Output>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn RecordFormatter> {
    match format {
        OutputFormat::Native => Box::new(NativeFormatter::new()),
        OutputFormat::Mapping => Box::new(MappingFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Yaml => Box::new(YamlFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whois::{
        Address, ContactInfo, Contacts, NameserverEntry, Registrar, RootData, RootRecord,
        StatusEntry, WhoisData, WhoisDates, WhoisRecord,
    };
    use chrono::{TimeZone, Utc};

    fn sample() -> ParsedRecord {
        ParsedRecord::Root(RootRecord {
            domain: Some("org".to_string()),
            is_valid: true,
            data: RootData {
                status: Some("active".to_string()),
                whois: Some("whois.publicinterestregistry.org".to_string()),
                ..RootData::default()
            },
            raw: None,
        })
    }

    fn populated_whois() -> ParsedRecord {
        let contact = |name: &str| ContactInfo {
            name: Some(name.to_string()),
            organization: Some("Example Holdings".to_string()),
            address: Address {
                street: Some("1 Main St".to_string()),
                city: Some("Springfield".to_string()),
                state_province: None,
                postal_code: Some("12345".to_string()),
                country: Some("US".to_string()),
            },
            phone: Some("+1.5555550100".to_string()),
            email: Some(format!("{}@example.net", name.to_lowercase())),
            ..ContactInfo::default()
        };

        ParsedRecord::Whois(WhoisRecord {
            domain: Some("example.net".to_string()),
            is_valid: true,
            is_reserved: false,
            is_available: false,
            data: WhoisData {
                id: Some("4214773_DOMAIN_NET-VRSN".to_string()),
                status: vec![
                    StatusEntry {
                        code: "clientTransferProhibited".to_string(),
                        url: Some("https://icann.org/epp#clientTransferProhibited".to_string()),
                    },
                    StatusEntry {
                        code: "ok".to_string(),
                        url: None,
                    },
                ],
                whois: Some("whois.example-registrar.com".to_string()),
                registrar: Registrar {
                    id: Some("376".to_string()),
                    name: Some("Example Registrar, LLC".to_string()),
                    whois: Some("whois.example-registrar.com".to_string()),
                    ..Registrar::default()
                },
                contacts: Contacts {
                    registrant: contact("Registrant"),
                    administrative: contact("Admin"),
                    technical: ContactInfo::default(),
                    billing: Some(contact("Billing")),
                },
                nameservers: vec![NameserverEntry {
                    host: "ns1.example.net".to_string(),
                    ipv4: Some("192.0.2.10".to_string()),
                    ipv6: None,
                }],
                dnssec: Some("unsigned".to_string()),
                dates: WhoisDates {
                    created: Some(Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap()),
                    updated: Some(Utc.with_ymd_and_hms(2024, 8, 14, 7, 1, 34).unwrap()),
                    expiration: Some(Utc.with_ymd_and_hms(2025, 8, 13, 4, 0, 0).unwrap()),
                },
            },
            raw: Some("Domain Name: EXAMPLE.NET\n".to_string()),
        })
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("OBJECT".parse::<OutputFormat>(), Ok(OutputFormat::Native));
        assert_eq!("array".parse::<OutputFormat>(), Ok(OutputFormat::Mapping));
        assert_eq!("serialize".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_serde_aliases() {
        let format: OutputFormat = serde_json::from_str(r#""array""#).unwrap();
        assert_eq!(format, OutputFormat::Mapping);
        assert_eq!(serde_json::to_string(&OutputFormat::Yaml).unwrap(), r#""yaml""#);
    }

    #[test]
    fn test_get_formatter_matches_format() {
        let record = sample();

        let native = get_formatter(OutputFormat::Native).format(&record).unwrap();
        assert_eq!(native.as_record(), Some(&record));

        let mapping = get_formatter(OutputFormat::Mapping).format(&record).unwrap();
        assert_eq!(mapping.as_mapping().unwrap()["type"], "root");

        let json = get_formatter(OutputFormat::Json).format(&record).unwrap();
        assert!(json.as_text().unwrap().starts_with('{'));

        let yaml = get_formatter(OutputFormat::Yaml).format(&record).unwrap();
        assert!(yaml.as_text().unwrap().contains("type: root"));
    }

    #[test]
    fn test_mapping_then_json_equals_direct_json() {
        for record in [sample(), populated_whois()] {
            let mapping = get_formatter(OutputFormat::Mapping).format(&record).unwrap();
            let reencoded = serde_json::to_string(mapping.as_mapping().unwrap()).unwrap();
            let direct = get_formatter(OutputFormat::Json).format(&record).unwrap();

            assert_eq!(Some(reencoded.as_str()), direct.as_text());
        }
    }

    #[test]
    fn test_populated_mapping_keeps_nested_values() {
        let mapping = get_formatter(OutputFormat::Mapping)
            .format(&populated_whois())
            .unwrap();
        let value = mapping.as_mapping().unwrap();

        assert_eq!(value["type"], "whois");
        assert_eq!(value["data"]["dates"]["created"], "1995-08-14T04:00:00Z");
        assert_eq!(value["data"]["status"][1]["url"], serde_json::Value::Null);
        assert_eq!(value["data"]["contacts"]["billing"]["email"], "billing@example.net");
        assert_eq!(value["raw"], "Domain Name: EXAMPLE.NET\n");

        let keys: Vec<&str> = value["data"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            ["_id", "status", "whois", "registrar", "contacts", "nameservers", "dnssec", "dates"]
        );
    }
}
