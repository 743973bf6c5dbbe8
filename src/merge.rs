//! Loads capture files and merges per-file tables of one kind.
//!
//! Merging is a plain key union: when two files hold the same instant, the
//! snapshot from the later file replaces the earlier one as a whole.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::collector::FileSystem;
use crate::error::{Error, ParseError, Result};
use crate::models::{ThreadDumpTable, Timestamp, UsageTable};
use crate::parser::{TimestampMatcher, parse_threaddump, parse_top};

/// Folds per-file tables in order; later tables win on timestamp collision.
pub fn merge_tables<T>(
    tables: impl IntoIterator<Item = BTreeMap<Timestamp, T>>,
) -> BTreeMap<Timestamp, T> {
    let mut merged = BTreeMap::new();
    for table in tables {
        for (timestamp, snapshot) in table {
            if merged.insert(timestamp, snapshot).is_some() {
                debug!(%timestamp, "snapshot replaced by a later file");
            }
        }
    }
    merged
}

/// Reads, parses and merges every `top` capture in `paths`.
pub fn load_usage<F: FileSystem>(
    fs: &F,
    paths: &[PathBuf],
    matcher: &TimestampMatcher,
) -> Result<UsageTable> {
    load(fs, paths, matcher, parse_top)
}

/// Reads, parses and merges every `jstack` capture in `paths`.
pub fn load_thread_dumps<F: FileSystem>(
    fs: &F,
    paths: &[PathBuf],
    matcher: &TimestampMatcher,
) -> Result<ThreadDumpTable> {
    load(fs, paths, matcher, parse_threaddump)
}

type ParseFn<T> = fn(
    &Path,
    &str,
    &TimestampMatcher,
) -> std::result::Result<BTreeMap<Timestamp, T>, ParseError>;

fn load<F: FileSystem, T>(
    fs: &F,
    paths: &[PathBuf],
    matcher: &TimestampMatcher,
    parse: ParseFn<T>,
) -> Result<BTreeMap<Timestamp, T>> {
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs.read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tables.push(parse(path, &content, matcher)?);
    }
    Ok(merge_tables(tables))
}
