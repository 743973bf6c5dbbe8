//! Report parameters.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::{Error, Result};

/// Default width of the rule lines between blocks.
pub const DEFAULT_WIDTH: usize = 80;

/// What to show for each timestamp, and which threads to keep.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// How many ranked candidates are considered per timestamp. Every
    /// candidate visited takes a slot, including ones dropped by a filter.
    pub rank_limit: Option<usize>,
    /// Threads below this CPU percent are not shown.
    pub cpu_floor: f64,
    /// Decimal pids or hex native ids to keep. Empty keeps all.
    pub thread_ids: BTreeSet<String>,
    /// Patterns searched in the thread name. Empty keeps all.
    pub thread_names: Vec<Regex>,
    /// Show the thread dump header line instead of the bare thread name.
    pub show_header_line: bool,
    /// Print the stack frames under each thread.
    pub show_full_stack: bool,
    pub width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            rank_limit: None,
            cpu_floor: 0.0,
            thread_ids: BTreeSet::new(),
            thread_names: Vec::new(),
            show_header_line: false,
            show_full_stack: false,
            width: DEFAULT_WIDTH,
        }
    }
}

impl ReportOptions {
    /// Compiles `patterns` into the thread name filter.
    pub fn with_name_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|e| {
                Error::config(format!("invalid thread name pattern '{pattern}': {e}"))
            })?;
            self.thread_names.push(regex);
        }
        Ok(self)
    }

    pub fn with_thread_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.thread_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Whether an id or name filter is set. The CPU floor does not count.
    pub fn has_identity_filter(&self) -> bool {
        !self.thread_ids.is_empty() || !self.thread_names.is_empty()
    }

    pub(crate) fn matches_id(&self, pid: u32, hex_pid: &str) -> bool {
        self.thread_ids.is_empty()
            || self.thread_ids.contains(&pid.to_string())
            || self.thread_ids.contains(hex_pid)
    }

    pub(crate) fn matches_name(&self, name: &str) -> bool {
        self.thread_names.is_empty() || self.thread_names.iter().any(|re| re.is_match(name))
    }
}

/// Converts the command-line limit, where -1 means unlimited.
///
/// Any other negative value considers no candidate at all.
pub fn rank_limit_from_arg(limit: i64) -> Option<usize> {
    match limit {
        -1 => None,
        l if l < 0 => Some(0),
        l => Some(usize::try_from(l).unwrap_or(usize::MAX)),
    }
}
