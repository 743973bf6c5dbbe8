//! Locates capture files under a data directory.
//!
//! The capture scripts write `high-cpu.out` (top) and `high-cpu-tdump.out`
//! (jstack), or `high-cpu-<pid>.out` / `high-cpu-tdump-<pid>.out` when a
//! specific JVM was targeted. Support bundles usually nest these one
//! directory per host, so the whole tree is searched.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::traits::FileSystem;
use crate::error::{Error, Result};

/// Which of the two captures a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// `top -H -b` thread CPU usage.
    Usage,
    /// `jstack` thread dumps.
    ThreadDump,
}

impl CaptureKind {
    /// File name the capture script uses for this kind.
    pub fn file_name(self, pid: Option<u32>) -> String {
        let stem = match self {
            Self::Usage => "high-cpu",
            Self::ThreadDump => "high-cpu-tdump",
        };
        match pid {
            Some(pid) => format!("{stem}-{pid}.out"),
            None => format!("{stem}.out"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Usage => "top",
            Self::ThreadDump => "thread dump",
        }
    }
}

/// Finds every capture of `kind` below `root`, sorted by path.
///
/// Sorting fixes the merge order, so when two files hold the same instant
/// the one with the greater path wins.
pub fn discover<F: FileSystem>(
    fs: &F,
    root: &Path,
    kind: CaptureKind,
    pid: Option<u32>,
) -> Result<Vec<PathBuf>> {
    if !fs.is_dir(root) {
        return Err(Error::config(format!(
            "data directory {} does not exist or is not a directory",
            root.display()
        )));
    }

    let wanted = kind.file_name(pid);
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs.read_dir(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            if fs.is_dir(&entry) {
                pending.push(entry);
            } else if entry.file_name().is_some_and(|name| name == wanted.as_str()) {
                debug!(file = %entry.display(), kind = kind.label(), "found capture");
                found.push(entry);
            }
        }
    }

    if found.is_empty() {
        return Err(Error::config(format!(
            "no {} capture named '{}' found under {}",
            kind.label(),
            wanted,
            root.display()
        )));
    }

    found.sort();
    info!(
        count = found.len(),
        kind = kind.label(),
        "discovered capture files"
    );
    Ok(found)
}
