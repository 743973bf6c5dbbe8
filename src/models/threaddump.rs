//! Records produced from `jstack` output.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One thread of a thread dump: its header line followed by its frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadStack {
    /// Native id as written after `nid=`, e.g. `0x1a72f`.
    pub nid: String,
    /// Quoted thread name from the header line.
    pub name: String,
    /// `lines[0]` is the header, the rest are frames in dump order.
    pub lines: Vec<String>,
}

impl ThreadStack {
    pub fn new(nid: impl Into<String>, name: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            nid: nid.into(),
            name: name.into(),
            lines: vec![header.into()],
        }
    }

    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    pub fn frames(&self) -> &[String] {
        self.lines.get(1..).unwrap_or_default()
    }
}

/// Every thread `jstack` printed for one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadDumpSnapshot {
    pub source_file: PathBuf,
    pub threads: BTreeMap<String, ThreadStack>,
}

impl ThreadDumpSnapshot {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            threads: BTreeMap::new(),
        }
    }
}
