//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built capture scenarios for testing
//! discovery, loading and reporting without touching the disk.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
