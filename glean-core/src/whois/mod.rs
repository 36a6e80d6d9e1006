mod dates;
mod fields;
mod lines;
mod parser;
pub mod parsers;
mod patterns;
mod record;

pub use dates::parse_date;
pub use fields::{FieldValue, FormattedGroup};
pub use lines::{group_lines, LineGroup};
pub use parser::WhoisParser;
pub use parsers::{RecordKind, IANA_BANNER};
pub use patterns::{Classifier, PatternCategory, PatternTable};
pub use record::{
    AbuseContact, Address, ContactInfo, Contacts, NameserverEntry, ParsedRecord, Registrar,
    RootContact, RootContacts, RootData, RootDates, RootRecord, StatusEntry, WhoisData,
    WhoisDates, WhoisRecord,
};
