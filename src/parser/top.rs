//! Parser for `top -H -b` captures.
//!
//! A capture is a sequence of blocks, each opened by a timestamp line:
//!
//! ```text
//! Thu Mar 04 02:05:01 PM UTC 2021
//! top - 14:05:01 up 10 days,  3:22,  2 users,  load average: 0.52, 0.58, 0.59
//! Threads: 412 total,   2 running, 410 sleeping,   0 stopped,   0 zombie
//! %Cpu(s):  6.3 us,  1.2 sy,  0.0 ni, 92.3 id,  0.0 wa,  0.0 hi,  0.2 si,  0.0 st
//! KiB Mem : 32779828 total,  1198316 free, 20349572 used, 11231940 buff/cache
//! KiB Swap:        0 total,        0 free,        0 used. 11946316 avail Mem
//!
//!    PID USER      PR  NI    VIRT    RES    SHR S %CPU %MEM     TIME+ COMMAND
//! 108335 jboss     20   0   14.7g   8.6g  40040 S  6.2  4.4   0:00.02 Thread-4 (Activ
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::timestamp::TimestampMatcher;
use crate::error::ParseError;
use crate::models::{
    CpuTotals, LoadAverages, ThreadUsage, Timestamp, UsageSnapshot, UsageTable, hex_pid,
};

static UPTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"up[ 0-9a-zA-Z]+").expect("valid regex"));
static LOAD_AVERAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"load average: ([0-9]+.[0-9]+), ([0-9]+.[0-9]+), ([0-9]+.[0-9]+)")
        .expect("valid regex")
});
static TASKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+ total").expect("valid regex"));
static CPU_US_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+.[0-9]+) us").expect("valid regex"));
static CPU_SY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+.[0-9]+) sy").expect("valid regex"));
static CPU_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+.[0-9]+) id").expect("valid regex"));

/// Table columns: PID USER PR NI VIRT RES SHR S %CPU %MEM TIME+ COMMAND
const FIELD_PID: usize = 0;
const FIELD_STATUS: usize = 7;
const FIELD_CPU: usize = 8;
const FIELD_MEM: usize = 9;
const FIELD_COMMAND: usize = 11;
const MIN_ROW_FIELDS: usize = FIELD_MEM + 1;

/// Parses the content of one `top` capture file.
///
/// `path` is only recorded on the snapshots and used in error messages.
pub fn parse_top(
    path: &Path,
    content: &str,
    matcher: &TimestampMatcher,
) -> Result<UsageTable, ParseError> {
    let mut table = UsageTable::new();
    let mut current: Option<(Timestamp, UsageSnapshot)> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        let err = |msg: String| ParseError::new(path, line_no, msg);

        if line.is_empty() || line.contains("PID") {
            continue;
        }

        if let Some(text) = matcher.match_line(line) {
            let timestamp = matcher.parse(text).map_err(err)?;
            if let Some((ts, snapshot)) = current.replace((timestamp, UsageSnapshot::new(path))) {
                table.insert(ts, snapshot);
            }
            continue;
        }

        let Some((_, snapshot)) = current.as_mut() else {
            continue;
        };

        if line.starts_with("top") {
            parse_summary_line(line, snapshot).map_err(err)?;
        } else if line.starts_with("Threads") || line.starts_with("Tasks") {
            snapshot.tasks = TASKS_RE
                .find(line)
                .ok_or_else(|| err("missing '<n> total' in task summary".to_string()))?
                .as_str()
                .to_string();
        } else if line.starts_with("%Cpu") {
            snapshot.cpu_totals = parse_cpu_line(line).map_err(err)?;
        } else if is_memory_line(line) {
            continue;
        } else {
            let usage = parse_thread_row(line, line_no).map_err(err)?;
            snapshot.threads.insert(usage.hex_pid.clone(), usage);
        }
    }

    if let Some((ts, snapshot)) = current {
        table.insert(ts, snapshot);
    }

    debug!(
        file = %path.display(),
        snapshots = table.len(),
        "parsed top capture"
    );

    Ok(table)
}

/// `top - 14:05:01 up 10 days,  3:22,  2 users,  load average: 0.52, 0.58, 0.59`
fn parse_summary_line(line: &str, snapshot: &mut UsageSnapshot) -> Result<(), String> {
    snapshot.uptime = UPTIME_RE
        .find(line)
        .ok_or("missing uptime in summary line")?
        .as_str()
        .to_string();

    let caps = LOAD_AVERAGE_RE
        .captures(line)
        .ok_or("missing load average in summary line")?;
    snapshot.load_averages = LoadAverages {
        one: caps[1].to_string(),
        five: caps[2].to_string(),
        fifteen: caps[3].to_string(),
    };
    Ok(())
}

/// `%Cpu(s):  6.3 us,  1.2 sy,  0.0 ni, 92.3 id, ...`
fn parse_cpu_line(line: &str) -> Result<CpuTotals, String> {
    let field = |re: &Regex, label: &str| -> Result<String, String> {
        re.captures(line)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| format!("missing '{label}' in CPU line"))
    };

    Ok(CpuTotals {
        user: field(&CPU_US_RE, "us")?,
        system: field(&CPU_SY_RE, "sy")?,
        idle: field(&CPU_ID_RE, "id")?,
    })
}

fn is_memory_line(line: &str) -> bool {
    ["KiB", "MiB", "GiB"].iter().any(|unit| {
        line.strip_prefix(unit)
            .is_some_and(|rest| rest.starts_with(" Mem") || rest.starts_with(" Swap"))
    })
}

fn parse_thread_row(line: &str, seq: usize) -> Result<ThreadUsage, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_ROW_FIELDS {
        return Err(format!(
            "not enough fields in thread row: expected {}+, got {}",
            MIN_ROW_FIELDS,
            fields.len()
        ));
    }

    let pid: u32 = fields[FIELD_PID]
        .parse()
        .map_err(|_| format!("invalid pid '{}'", fields[FIELD_PID]))?;
    let cpu: f64 = fields[FIELD_CPU]
        .parse()
        .map_err(|_| format!("invalid %CPU '{}'", fields[FIELD_CPU]))?;
    let mem: f64 = fields[FIELD_MEM]
        .parse()
        .map_err(|_| format!("invalid %MEM '{}'", fields[FIELD_MEM]))?;

    Ok(ThreadUsage {
        pid,
        hex_pid: hex_pid(pid),
        cpu,
        mem,
        status: fields[FIELD_STATUS].to_string(),
        command: fields.get(FIELD_COMMAND..).unwrap_or_default().join(" "),
        line: line.to_string(),
        seq,
    })
}
