//! Error types shared by the parsers, the merger and the reporter.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Timestamp;

/// A line that was expected to have a known shape did not.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}:{line}: {message}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    /// 1-based line number within `path`.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            message: msg.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(
        "No thread dump captured at {} (needed by {})",
        .timestamp.format(crate::fmt::TIMESTAMP_FORMAT),
        .source_file.display()
    )]
    Correlation {
        timestamp: Timestamp,
        source_file: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("/data/high-cpu.out", 12, "invalid pid 'abc'");
        assert_eq!(err.to_string(), "/data/high-cpu.out:12: invalid pid 'abc'");

        let wrapped: Error = err.into();
        assert_eq!(
            wrapped.to_string(),
            "Parse error: /data/high-cpu.out:12: invalid pid 'abc'"
        );
    }

    #[test]
    fn test_correlation_error_display() {
        let timestamp = chrono::NaiveDate::from_ymd_opt(2021, 3, 4)
            .unwrap()
            .and_hms_opt(14, 5, 1)
            .unwrap();
        let err = Error::Correlation {
            timestamp,
            source_file: PathBuf::from("high-cpu.out"),
        };
        assert_eq!(
            err.to_string(),
            "No thread dump captured at 2021-03-04 14:05:01 (needed by high-cpu.out)"
        );
    }
}
