use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

/// `key: value`, split on the first colon that is followed by whitespace.
static KEY_VALUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?):\s+(.*)$").expect("Invalid key/value regex"));

/// A value in a [`FormattedGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Last occurrence wins.
    Single(String),
    /// Repeatable field, in first-seen order.
    List(Vec<String>),
    /// Role-prefixed fields with the prefix stripped; empty values are `None`.
    Role(BTreeMap<String, Option<String>>),
}

/// Normalized field name to value, for one line group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedGroup {
    fields: HashMap<String, FieldValue>,
}

impl FormattedGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// The value of a single-valued field.
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The values of a repeatable field, empty when absent.
    pub fn list(&self, key: &str) -> &[String] {
        match self.fields.get(key) {
            Some(FieldValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn role(&self, key: &str) -> Option<&BTreeMap<String, Option<String>>> {
        match self.fields.get(key) {
            Some(FieldValue::Role(fields)) => Some(fields),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), FieldValue::Single(value));
    }

    pub fn append(&mut self, key: &str, value: String) {
        match self.fields.get_mut(key) {
            Some(FieldValue::List(values)) => values.push(value),
            _ => {
                self.fields
                    .insert(key.to_string(), FieldValue::List(vec![value]));
            }
        }
    }

    pub fn set_role_field(&mut self, role: &str, key: &str, value: Option<String>) {
        match self.fields.get_mut(role) {
            Some(FieldValue::Role(fields)) => {
                fields.insert(key.to_string(), value);
            }
            _ => {
                let mut fields = BTreeMap::new();
                fields.insert(key.to_string(), value);
                self.fields.insert(role.to_string(), FieldValue::Role(fields));
            }
        }
    }
}

/// Splits a line into its raw key and trimmed value.
///
/// Returns `None` for lines without a `key: value` shape.
pub fn split_key_value(line: &str) -> Option<(&str, String)> {
    let caps = KEY_VALUE_PATTERN.captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    Some((key, value.to_string()))
}

/// `None` for empty strings.
pub fn null_or_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
