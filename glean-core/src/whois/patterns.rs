//! Data-driven classification of raw WHOIS text.
//!
//! Registries announce availability, reservation and throttling in free-form
//! prose. Rather than special-casing each registry, the text is tested against
//! named lists of line patterns supplied as data. Each pattern must match one
//! complete line, case-insensitively.

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GleanError, Result};

const STOCK_PATTERNS: &str = include_str!("../../data/patterns.json");

/// The named pattern lists a [`PatternTable`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    RateLimit,
    Invalid,
    Reserved,
    Taken,
    Available,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 5] = [
        PatternCategory::RateLimit,
        PatternCategory::Invalid,
        PatternCategory::Reserved,
        PatternCategory::Taken,
        PatternCategory::Available,
    ];
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternCategory::RateLimit => write!(f, "rate_limit"),
            PatternCategory::Invalid => write!(f, "invalid"),
            PatternCategory::Reserved => write!(f, "reserved"),
            PatternCategory::Taken => write!(f, "taken"),
            PatternCategory::Available => write!(f, "available"),
        }
    }
}

/// Ordered pattern strings for each category.
///
/// Categories missing from a loaded document are empty, and an empty list
/// never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTable {
    pub rate_limit: Vec<String>,
    pub invalid: Vec<String>,
    pub reserved: Vec<String>,
    pub taken: Vec<String>,
    pub available: Vec<String>,
}

impl PatternTable {
    /// The table shipped with the crate in `data/patterns.json`.
    pub fn stock() -> Self {
        Self::bundled(STOCK_PATTERNS)
    }

    fn bundled(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Bundled pattern table is malformed, using an empty table");
                Self::default()
            }
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn get(&self, category: PatternCategory) -> &[String] {
        match category {
            PatternCategory::RateLimit => &self.rate_limit,
            PatternCategory::Invalid => &self.invalid,
            PatternCategory::Reserved => &self.reserved,
            PatternCategory::Taken => &self.taken,
            PatternCategory::Available => &self.available,
        }
    }

    /// Replaces the patterns of one category.
    pub fn with(mut self, category: PatternCategory, patterns: Vec<String>) -> Self {
        let slot = match category {
            PatternCategory::RateLimit => &mut self.rate_limit,
            PatternCategory::Invalid => &mut self.invalid,
            PatternCategory::Reserved => &mut self.reserved,
            PatternCategory::Taken => &mut self.taken,
            PatternCategory::Available => &mut self.available,
        };
        *slot = patterns;
        self
    }
}

/// A [`PatternTable`] compiled into line-anchored regexes.
#[derive(Debug, Clone)]
pub struct Classifier {
    rate_limit: Vec<Regex>,
    invalid: Vec<Regex>,
    reserved: Vec<Regex>,
    taken: Vec<Regex>,
    available: Vec<Regex>,
}

impl Classifier {
    pub fn new(table: &PatternTable) -> Result<Self> {
        Ok(Self {
            rate_limit: compile(table, PatternCategory::RateLimit)?,
            invalid: compile(table, PatternCategory::Invalid)?,
            reserved: compile(table, PatternCategory::Reserved)?,
            taken: compile(table, PatternCategory::Taken)?,
            available: compile(table, PatternCategory::Available)?,
        })
    }

    fn compiled(&self, category: PatternCategory) -> &[Regex] {
        match category {
            PatternCategory::RateLimit => &self.rate_limit,
            PatternCategory::Invalid => &self.invalid,
            PatternCategory::Reserved => &self.reserved,
            PatternCategory::Taken => &self.taken,
            PatternCategory::Available => &self.available,
        }
    }

    /// Returns true if any pattern of `category` matches a whole line of `text`.
    pub fn matches(&self, text: &str, category: PatternCategory) -> bool {
        self.compiled(category).iter().any(|re| re.is_match(text))
    }

    pub fn is_rate_limited(&self, text: &str) -> bool {
        self.matches(text, PatternCategory::RateLimit)
    }

    pub fn is_valid(&self, text: &str) -> bool {
        !self.matches(text, PatternCategory::Invalid)
    }

    pub fn is_reserved(&self, text: &str) -> bool {
        self.matches(text, PatternCategory::Reserved)
    }

    /// Reservation overrides any other signal, and an explicit "taken" line
    /// overrides an "available" one.
    pub fn is_available(&self, text: &str) -> bool {
        if self.is_reserved(text) {
            return false;
        }
        if self.matches(text, PatternCategory::Taken) {
            return false;
        }
        self.matches(text, PatternCategory::Available)
    }
}

fn compile(table: &PatternTable, category: PatternCategory) -> Result<Vec<Regex>> {
    let compiled = table
        .get(category)
        .iter()
        .map(|pattern| {
            Regex::new(&format!(r"(?im)^(?:{})\r?$", pattern)).map_err(|source| {
                GleanError::InvalidPattern {
                    category,
                    pattern: pattern.clone(),
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(category = %category, count = compiled.len(), "Compiled patterns");
    Ok(compiled)
}
