//! Parsed snapshot records for both capture kinds.
//!
//! Both parsers produce a table keyed by [`Timestamp`]. Tables are
//! `BTreeMap`s so the reporter visits instants in ascending order without
//! an extra sort.

mod threaddump;
mod usage;

use std::collections::BTreeMap;

pub use threaddump::{ThreadDumpSnapshot, ThreadStack};
pub use usage::{CpuTotals, LoadAverages, ThreadUsage, UsageSnapshot, hex_pid};

/// Join key between the two captures.
pub type Timestamp = chrono::NaiveDateTime;

/// All `top` snapshots of a run, by instant.
pub type UsageTable = BTreeMap<Timestamp, UsageSnapshot>;

/// All `jstack` snapshots of a run, by instant.
pub type ThreadDumpTable = BTreeMap<Timestamp, ThreadDumpSnapshot>;
