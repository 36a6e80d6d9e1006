use super::{Output, RecordFormatter};
use crate::error::Result;
use crate::whois::ParsedRecord;

/// Hands back the typed record unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFormatter;

impl NativeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl RecordFormatter for NativeFormatter {
    fn format(&self, record: &ParsedRecord) -> Result<Output> {
        Ok(Output::Native(record.clone()))
    }
}
