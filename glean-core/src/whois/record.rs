//! Output shapes for parsed WHOIS records.
//!
//! Every field is always present in the serialized form, with `null` where a
//! registry did not supply a value, so consumers see one stable shape no
//! matter which registry answered. The only optional keys are `raw` and the
//! billing contact, which appear only when enabled in the parser config.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed response, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParsedRecord {
    /// A top-level delegation record from the IANA root database.
    Root(RootRecord),
    /// A registry or registrar record for one domain.
    Whois(WhoisRecord),
}

impl ParsedRecord {
    pub fn domain(&self) -> Option<&str> {
        match self {
            ParsedRecord::Root(record) => record.domain.as_deref(),
            ParsedRecord::Whois(record) => record.domain.as_deref(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            ParsedRecord::Root(record) => record.is_valid,
            ParsedRecord::Whois(record) => record.is_valid,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParsedRecord::Root(_))
    }

    pub fn is_whois(&self) -> bool {
        matches!(self, ParsedRecord::Whois(_))
    }

    pub fn record_type(&self) -> &'static str {
        match self {
            ParsedRecord::Root(_) => "root",
            ParsedRecord::Whois(_) => "whois",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootRecord {
    pub domain: Option<String>,
    pub is_valid: bool,
    pub data: RootData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootData {
    pub status: Option<String>,
    pub whois: Option<String>,
    pub contacts: RootContacts,
    pub nameservers: Vec<NameserverEntry>,
    pub dates: RootDates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootContacts {
    pub sponsor: Option<RootContact>,
    pub administrative: Option<RootContact>,
    pub technical: Option<RootContact>,
}

/// Contact details as published in the root database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootContact {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub address: Vec<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootDates {
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhoisRecord {
    pub domain: Option<String>,
    pub is_valid: bool,
    pub is_reserved: bool,
    pub is_available: bool,
    pub data: WhoisData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisData {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub status: Vec<StatusEntry>,
    pub whois: Option<String>,
    pub registrar: Registrar,
    pub contacts: Contacts,
    pub nameservers: Vec<NameserverEntry>,
    pub dnssec: Option<String>,
    pub dates: WhoisDates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub code: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrar {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub whois: Option<String>,
    pub abuse_contact: AbuseContact,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuseContact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub registrant: ContactInfo,
    pub administrative: ContactInfo,
    pub technical: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<ContactInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub address: Address,
    pub phone: Option<String>,
    pub phone_ext: Option<String>,
    pub fax: Option<String>,
    pub fax_ext: Option<String>,
    pub email: Option<String>,
}

impl ContactInfo {
    /// True when the registry supplied none of the contact's fields.
    pub fn is_empty(&self) -> bool {
        *self == ContactInfo::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// A delegated nameserver. At most one of `ipv4`/`ipv6` is set for
/// resolved domain nameservers; root records may carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameserverEntry {
    pub host: String,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisDates {
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub expiration: Option<DateTime<Utc>>,
}
