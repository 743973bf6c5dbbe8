//! Recognises and parses the timestamp lines that open every snapshot.
//!
//! The capture scripts print `date` before each `top`/`jstack` run, so the
//! shape of the line follows the capturing host's locale. Both the pattern
//! used to spot those lines and the `strftime` format used to parse them are
//! configurable; one pair applies to every file of a run.

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{Error, Result};
use crate::models::Timestamp;

/// Matches en_US `date` output, e.g. `Thu Mar 04 02:05:01 PM UTC 2021`.
pub const DEFAULT_DATETIME_REGEX: &str =
    r"\w{3,4} \w{3,4} {1,2}\d{1,2} \d{1,2}:\d{1,2}:\d{1,2} (AM|PM) \w{3,4} \d{4}";

/// Parses [`DEFAULT_DATETIME_REGEX`] matches.
pub const DEFAULT_DATETIME_FORMAT: &str = "%a %b %d %I:%M:%S %p %Z %Y";

/// Compiled timestamp pattern plus the format used to parse its matches.
#[derive(Debug, Clone)]
pub struct TimestampMatcher {
    regex: Regex,
    format: String,
}

impl TimestampMatcher {
    pub fn new(regex: &str, format: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(regex)
            .map_err(|e| Error::config(format!("invalid datetime regex '{regex}': {e}")))?;
        Ok(Self {
            regex,
            format: format.into(),
        })
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the part of `line` recognised as a timestamp.
    ///
    /// The pattern has to match at the very start of the line.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .find(line)
            .filter(|m| m.start() == 0)
            .map(|m| m.as_str())
    }

    /// Parses text previously returned by [`match_line`](Self::match_line).
    pub fn parse(&self, text: &str) -> std::result::Result<Timestamp, String> {
        NaiveDateTime::parse_from_str(text, &self.format)
            .map_err(|e| format!("cannot parse '{}' with format '{}': {}", text, self.format, e))
    }
}

impl Default for TimestampMatcher {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_DATETIME_REGEX).expect("default datetime regex is valid"),
            format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}
