//! highcpu - ranks the busiest Java threads of a high-CPU capture.
//!
//! Reads the `top -H -b` and `jstack` captures found under a data directory,
//! matches them by timestamp and native thread id, and prints one block per
//! capture instant.
//!
//! Usage:
//!   highcpu ./support-bundle                 # every thread, every instant
//!   highcpu ./support-bundle -l 5 -S         # top 5 threads with stacks
//!   highcpu ./support-bundle -p 4242 --cpu 4.8
//!   highcpu ./support-bundle -T 'http-nio-.*' -I

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use highcpu::collector::{CaptureKind, RealFs, discover};
use highcpu::merge::{load_thread_dumps, load_usage};
use highcpu::parser::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATETIME_REGEX, TimestampMatcher};
use highcpu::report::{DEFAULT_WIDTH, ReportOptions, rank_limit_from_arg, render_report};

/// Analyze top and Java thread dump captures.
#[derive(Parser)]
#[command(name = "highcpu", about = "Analyze top and Java thread dumps", version)]
struct Args {
    /// Directory searched recursively for capture files.
    datadir: PathBuf,

    /// Process ID the captures were taken for (selects high-cpu-<PID>.out).
    #[arg(short, long)]
    pid: Option<u32>,

    /// Limit to the top X threads per instant (-1 for no limit).
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i64,

    /// Print the stack trace for each thread.
    #[arg(short = 'S', long)]
    print_stack_trace: bool,

    /// Print the thread dump header line instead of the thread name.
    #[arg(short = 'I', long)]
    print_thread_info: bool,

    /// Only show threads at or above this CPU% (example: 4.8).
    #[arg(long, default_value_t = 0.0)]
    cpu: f64,

    /// strftime format of the capture timestamp lines.
    #[arg(long, env = "HIGHCPU_DATETIME_FORMAT", default_value = DEFAULT_DATETIME_FORMAT)]
    datetime_format: String,

    /// Regex recognising the capture timestamp lines.
    #[arg(long, env = "HIGHCPU_DATETIME_REGEX", default_value = DEFAULT_DATETIME_REGEX)]
    datetime_regex: String,

    /// Limit results to a thread PID (decimal) or NID (hex). Repeatable.
    #[arg(short = 't', long = "thread-id", value_name = "ID")]
    thread_ids: Vec<String>,

    /// Limit results to thread names matching a regex. Repeatable.
    #[arg(short = 'T', long = "thread-name", value_name = "REGEX")]
    thread_names: Vec<String>,

    /// Width of the separator lines.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr; stdout carries the report.
/// Default level is WARN. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("highcpu={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> highcpu::Result<String> {
    let matcher = TimestampMatcher::new(&args.datetime_regex, args.datetime_format.as_str())?;
    let options = ReportOptions {
        rank_limit: rank_limit_from_arg(args.limit),
        cpu_floor: args.cpu,
        show_header_line: args.print_thread_info,
        show_full_stack: args.print_stack_trace,
        width: args.width,
        ..ReportOptions::default()
    }
    .with_thread_ids(args.thread_ids.iter().cloned())
    .with_name_patterns(&args.thread_names)?;

    let fs = RealFs::new();
    let usage_paths = discover(&fs, &args.datadir, CaptureKind::Usage, args.pid)?;
    let dump_paths = discover(&fs, &args.datadir, CaptureKind::ThreadDump, args.pid)?;

    let usage = load_usage(&fs, &usage_paths, &matcher)?;
    let dumps = load_thread_dumps(&fs, &dump_paths, &matcher)?;
    info!(
        top_snapshots = usage.len(),
        dump_snapshots = dumps.len(),
        "captures loaded"
    );

    render_report(&usage, &dumps, &options)
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match io::stdout().lock().write_all(report.as_bytes()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
            eprintln!("Error writing report: {}", e);
            std::process::exit(1);
        }
        _ => {}
    }
}
