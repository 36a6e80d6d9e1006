use super::{Output, RecordFormatter};
use crate::error::Result;
use crate::whois::ParsedRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl RecordFormatter for YamlFormatter {
    fn format(&self, record: &ParsedRecord) -> Result<Output> {
        Ok(Output::Text(serde_yaml::to_string(record)?))
    }
}
