//! highcpu - correlates `top` thread snapshots with Java thread dumps.
//!
//! Given the `top -H -b` and `jstack` captures taken at the same instants,
//! reports which threads used the most CPU at each instant, optionally with
//! their stack traces.
//!
//! - `collector` — filesystem seam and capture discovery
//! - `parser` — line-oriented parsers for both capture kinds
//! - `merge` — loads files and merges per-file tables
//! - `report` — ranking, filtering and text rendering
//! - `models` — parsed snapshot records
//! - `fmt` — report formatting helpers

pub mod collector;
pub mod error;
pub mod fmt;
pub mod merge;
pub mod models;
pub mod parser;
pub mod report;

pub use error::{Error, ParseError, Result};
