//! Shared formatting helpers for the text report.

use crate::models::Timestamp;

/// Display format of the `DATE/TIME` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column where stack frames start under a report row.
pub const STACK_INDENT: usize = 34;

/// A horizontal rule of `width` copies of `ch`.
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}

/// Format a percentage with two decimals, without the `%` sign.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// One thread row: `PID HEX %CPU %MEM NAME`.
pub fn format_thread_row(pid: u32, hex_pid: &str, cpu: f64, mem: f64, name: &str) -> String {
    format!("{pid:<10} {hex_pid:<8} {cpu:6.2} {mem:6.2} {name}")
}

/// A stack frame indented under its thread row.
pub fn format_stack_line(line: &str) -> String {
    format!("{:indent$}{line}", "", indent = STACK_INDENT)
}
