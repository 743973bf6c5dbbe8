//! Records produced from `top -H -b` output.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Load averages from the `top` summary line, kept as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadAverages {
    pub one: String,
    pub five: String,
    pub fifteen: String,
}

/// Host CPU split from the `%Cpu(s):` line, kept as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTotals {
    pub user: String,
    pub system: String,
    pub idle: String,
}

/// One row of the `top` thread table.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadUsage {
    pub pid: u32,
    /// `pid` in lowercase hex with a `0x` prefix, matching `jstack`'s `nid=`.
    pub hex_pid: String,
    pub cpu: f64,
    pub mem: f64,
    /// Process state column (`R`, `S`, `D`, ...).
    pub status: String,
    pub command: String,
    /// Trimmed source line.
    pub line: String,
    /// Line number of the row in its file. Only used as a ranking tiebreak.
    pub seq: usize,
}

/// Everything `top` printed for one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSnapshot {
    pub source_file: PathBuf,
    pub uptime: String,
    pub load_averages: LoadAverages,
    pub cpu_totals: CpuTotals,
    /// Raw `"<n> total"` text from the `Threads:`/`Tasks:` line.
    pub tasks: String,
    pub threads: BTreeMap<String, ThreadUsage>,
}

impl UsageSnapshot {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    /// Sum of CPU percent over every thread, regardless of any report filter.
    pub fn total_cpu(&self) -> f64 {
        self.threads.values().map(|t| t.cpu).sum()
    }

    /// Threads ordered by CPU descending, ties in file order.
    pub fn ranked_threads(&self) -> Vec<&ThreadUsage> {
        let mut threads: Vec<&ThreadUsage> = self.threads.values().collect();
        threads.sort_by(|a, b| b.cpu.total_cmp(&a.cpu).then(a.seq.cmp(&b.seq)));
        threads
    }
}

/// Formats a decimal thread id the way `jstack` prints native ids.
pub fn hex_pid(pid: u32) -> String {
    format!("{pid:#x}")
}
