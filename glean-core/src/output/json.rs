use super::{Output, RecordFormatter};
use crate::error::Result;
use crate::whois::ParsedRecord;

pub struct JsonFormatter {
    pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &ParsedRecord) -> Result<Output> {
        Ok(Output::Text(self.to_json(record)?))
    }
}
