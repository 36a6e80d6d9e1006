use super::{Output, RecordFormatter};
use crate::error::Result;
use crate::whois::ParsedRecord;

/// Converts the record into a plain `serde_json::Value` tree.
///
/// Object keys keep the record's field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingFormatter;

impl MappingFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl RecordFormatter for MappingFormatter {
    fn format(&self, record: &ParsedRecord) -> Result<Output> {
        Ok(Output::Mapping(serde_json::to_value(record)?))
    }
}
