//! Parser for `jstack` captures.
//!
//! The capture script prints a localized `date` line before each `jstack`
//! run, and `jstack` then prints its own timestamp line. Only the first one
//! is parsed; the line right after it is always discarded.
//!
//! ```text
//! Thu Mar 04 02:05:01 PM UTC 2021
//! 2021-03-04 14:05:01
//! Full thread dump OpenJDK 64-Bit Server VM (25.282-b08 mixed mode):
//!
//! "Thread-4 (ActiveMQ-client-global-threads)" #88 daemon prio=5 os_prio=0 tid=0x00007f3c nid=0x1a72f runnable [0x00007f3b]
//!    java.lang.Thread.State: RUNNABLE
//!         at java.net.SocketInputStream.socketRead0(Native Method)
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::timestamp::TimestampMatcher;
use crate::error::ParseError;
use crate::models::{ThreadDumpSnapshot, ThreadDumpTable, ThreadStack, Timestamp};

static NID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nid=(0x[0-9a-zA-Z]+)").expect("valid regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)""#).expect("valid regex"));

const NID_MARKER: &str = "nid=0x";
const FULL_DUMP_MARKER: &str = "Full thread";

/// Snapshot being filled plus the id of the stack lines are appended to.
struct Cursor {
    timestamp: Timestamp,
    snapshot: ThreadDumpSnapshot,
    nid: Option<String>,
}

/// Parses the content of one `jstack` capture file.
pub fn parse_threaddump(
    path: &Path,
    content: &str,
    matcher: &TimestampMatcher,
) -> Result<ThreadDumpTable, ParseError> {
    let mut table = ThreadDumpTable::new();
    let mut current: Option<Cursor> = None;
    let mut skip_next = false;
    let mut orphans = 0usize;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end();

        if skip_next {
            skip_next = false;
            continue;
        }

        if let Some(text) = matcher.match_line(line) {
            let timestamp = matcher
                .parse(text)
                .map_err(|msg| ParseError::new(path, line_no, msg))?;
            let next = Cursor {
                timestamp,
                snapshot: ThreadDumpSnapshot::new(path),
                nid: None,
            };
            if let Some(done) = current.replace(next) {
                table.insert(done.timestamp, done.snapshot);
            }
            skip_next = true;
            continue;
        }

        if line.contains(FULL_DUMP_MARKER) || line.is_empty() {
            continue;
        }

        let Some(cursor) = current.as_mut() else {
            continue;
        };

        if line.contains(NID_MARKER) {
            let stack = parse_thread_header(line)
                .map_err(|msg| ParseError::new(path, line_no, msg))?;
            cursor.nid = Some(stack.nid.clone());
            cursor.snapshot.threads.insert(stack.nid.clone(), stack);
            continue;
        }

        match cursor
            .nid
            .as_ref()
            .and_then(|nid| cursor.snapshot.threads.get_mut(nid))
        {
            Some(stack) => stack.lines.push(line.to_string()),
            None => {
                orphans += 1;
                debug!(
                    file = %path.display(),
                    line = line_no,
                    "skipping line outside of any thread stack"
                );
            }
        }
    }

    if let Some(done) = current {
        table.insert(done.timestamp, done.snapshot);
    }

    debug!(
        file = %path.display(),
        snapshots = table.len(),
        skipped = orphans,
        "parsed thread dump capture"
    );

    Ok(table)
}

/// Builds a stack from a header such as
/// `"main" #1 prio=5 os_prio=0 tid=0x00007f nid=0x1a2b runnable`.
fn parse_thread_header(line: &str) -> Result<ThreadStack, String> {
    let nid = NID_RE
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or("missing native id in thread header")?;
    let name = NAME_RE
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or("missing quoted thread name in thread header")?;
    Ok(ThreadStack::new(nid, name, line))
}
