//! Correlates `top` snapshots with thread dumps and renders the report.
//!
//! For every `top` instant, threads are ranked by CPU, filtered, and joined
//! with the thread dump taken at the same instant by native id. The report
//! is rendered into a string first so a failure never leaves a partial
//! report on stdout.

mod options;

pub use options::{DEFAULT_WIDTH, ReportOptions, rank_limit_from_arg};

use tracing::debug;

use crate::error::{Error, Result};
use crate::fmt::{format_percent, format_stack_line, format_thread_row, format_timestamp, rule};
use crate::models::{
    ThreadDumpSnapshot, ThreadDumpTable, ThreadStack, ThreadUsage, Timestamp, UsageSnapshot,
    UsageTable,
};

/// A thread that made it into the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow<'a> {
    pub usage: &'a ThreadUsage,
    pub stack: Option<&'a ThreadStack>,
    /// Name shown in the row: the dump's thread name, the `top` command when
    /// the dump has no such thread, or the dump header line if requested.
    pub name: &'a str,
}

/// Rows selected for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub rows: Vec<ReportRow<'a>>,
    /// CPU percent of every thread in the snapshot, filtered or not.
    pub total_cpu: f64,
    /// CPU percent of the selected rows.
    pub selected_cpu: f64,
}

/// Ranks and filters the threads of one instant.
pub fn select_threads<'a>(
    usage: &'a UsageSnapshot,
    dump: &'a ThreadDumpSnapshot,
    options: &ReportOptions,
) -> Selection<'a> {
    let total_cpu = usage.total_cpu();
    let mut rows = Vec::new();
    let mut selected_cpu = 0.0;

    let ranked = usage.ranked_threads();
    let candidates = match options.rank_limit {
        Some(limit) => &ranked[..limit.min(ranked.len())],
        None => &ranked[..],
    };

    for &thread in candidates {
        if thread.cpu < options.cpu_floor {
            continue;
        }

        let stack = dump.threads.get(&thread.hex_pid);
        let name = stack.map_or(thread.command.as_str(), |s| s.name.as_str());

        if !options.matches_id(thread.pid, &thread.hex_pid) || !options.matches_name(name) {
            continue;
        }

        let name = match stack {
            Some(stack) if options.show_header_line => stack.header(),
            _ => name,
        };

        selected_cpu += thread.cpu;
        rows.push(ReportRow {
            usage: thread,
            stack,
            name,
        });
    }

    Selection {
        rows,
        total_cpu,
        selected_cpu,
    }
}

/// Renders one block per `top` instant, in ascending time order.
///
/// Fails with [`Error::Correlation`] if an instant has no thread dump at all.
/// Threads missing from an existing dump fall back to their `top` command.
pub fn render_report(
    usage: &UsageTable,
    dumps: &ThreadDumpTable,
    options: &ReportOptions,
) -> Result<String> {
    let mut lines = Vec::new();

    for (timestamp, snapshot) in usage {
        let dump = dumps.get(timestamp).ok_or_else(|| Error::Correlation {
            timestamp: *timestamp,
            source_file: snapshot.source_file.clone(),
        })?;
        let selection = select_threads(snapshot, dump, options);
        debug!(
            %timestamp,
            threads = snapshot.threads.len(),
            shown = selection.rows.len(),
            "rendering snapshot"
        );
        render_block(&mut lines, timestamp, snapshot, dump, &selection, options);
    }

    lines.push(rule('=', options.width));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn render_block(
    lines: &mut Vec<String>,
    timestamp: &Timestamp,
    usage: &UsageSnapshot,
    dump: &ThreadDumpSnapshot,
    selection: &Selection<'_>,
    options: &ReportOptions,
) {
    let cpu = &usage.cpu_totals;
    let load = &usage.load_averages;

    lines.push(rule('=', options.width));
    lines.push(format!("DATE/TIME: {}", format_timestamp(timestamp)));
    lines.push(format!("HIGH-CPU : {}", usage.source_file.display()));
    lines.push(format!("TDUMP    : {}", dump.source_file.display()));
    lines.push(format!(
        "CPU      : {} us, {} sy, {} id, load average: {} / {} / {}",
        cpu.user, cpu.system, cpu.idle, load.one, load.five, load.fifteen
    ));

    let total = format_percent(selection.total_cpu);
    let selected = format_percent(selection.selected_cpu);
    if selected != total {
        lines.push(format!("CPU%     : {selected}% / {total}%"));
    } else {
        lines.push(format!("CPU%     : {total}%"));
    }

    // The CPU floor alone keeps the raw task count here.
    if options.has_identity_filter() {
        lines.push(format!("TASKS    : {} / {}", selection.rows.len(), usage.tasks));
    } else {
        lines.push(format!("TASKS    : {}", usage.tasks));
    }

    lines.push(rule('-', options.width));

    for row in &selection.rows {
        let t = row.usage;
        lines.push(format_thread_row(t.pid, &t.hex_pid, t.cpu, t.mem, row.name));
        if let Some(stack) = row.stack.filter(|_| options.show_full_stack) {
            lines.extend(stack.frames().iter().map(|frame| format_stack_line(frame)));
        }
    }
}
