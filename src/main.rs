// rlog - main.rs
//
// rlog-demo: exercises the public API end to end. Handles:
// 1. CLI argument parsing
// 2. Diagnostics initialisation (--diagnostics)
// 3. Optional overrides on top of the RLOG_* environment
// 4. A walk through every level, trace depths and output redirection

use clap::Parser;
use rlog::platform::config::read_conf_file;
use rlog::util::constants::{KEY_LOG_LEVEL, KEY_TRACE_LEVEL};
use rlog::util::error::SinkError;
use rlog::{RawConfig, RlogError};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// rlog-demo - Show rlog output under the current configuration.
///
/// rlog is controlled through RLOG_* environment variables. Try
/// RLOG_LOG_LEVEL=DEBUG, RLOG_TRACE_LEVEL=5 or RLOG_CALLER_INFO=yes.
#[derive(Parser, Debug)]
#[command(name = "rlog-demo", version, about)]
struct Cli {
    /// Log level spec overriding RLOG_LOG_LEVEL, e.g. "main.rs=DEBUG,WARN".
    #[arg(short = 'l', long = "level")]
    level: Option<String>,

    /// Trace level spec overriding RLOG_TRACE_LEVEL.
    #[arg(short = 't', long = "trace")]
    trace: Option<String>,

    /// Configuration file to watch (same format as RLOG_CONF_FILE).
    #[arg(short = 'c', long = "conf")]
    conf: Option<PathBuf>,

    /// How deep the recursive trace example descends.
    #[arg(long = "depth", default_value_t = 10)]
    depth: u32,

    /// Redirect output to this file at the end of the run.
    #[arg(short = 'r', long = "redirect")]
    redirect: Option<PathBuf>,

    /// Show rlog's own diagnostics on stderr.
    #[arg(short = 'd', long = "diagnostics")]
    diagnostics: bool,
}

fn recurse(depth: u32, max: u32) {
    rlog::trace!(depth, "We're {} levels down now...", depth);
    if depth < max {
        recurse(depth + 1, max);
    } else {
        rlog::info!("Reached end of recursion at level {}", depth);
    }
}

fn run(cli: &Cli) -> rlog::Result<()> {
    if cli.level.is_some() || cli.trace.is_some() {
        let mut raw = RawConfig::from_env();
        if let Some(level) = &cli.level {
            raw.set(KEY_LOG_LEVEL, level);
        }
        if let Some(trace) = &cli.trace {
            raw.set(KEY_TRACE_LEVEL, trace);
        }
        rlog::logger().update_base(raw);
    }

    if let Some(path) = &cli.conf {
        // Surface unreadable files here; the logger itself only warns.
        let entries = read_conf_file(path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "Using configuration file");
        rlog::set_conf_file(path);
    }

    rlog::info(["Start of program"]);
    rlog::debug(["You only see this with RLOG_LOG_LEVEL=DEBUG"]);
    rlog::infof(format_args!("Format {} are possible {}", "strings", 123));
    let mixed: [&dyn std::fmt::Display; 4] = [&"Plain arguments are joined:", &1, &"two", &3.5];
    rlog::info(mixed);
    rlog::warn(["Warning level log message"]);
    rlog::error(["Error level log message"]);
    rlog::critical(["Critical level log message"]);

    rlog::trace(1, ["Trace messages have their own numeric levels"]);
    rlog::tracef(1, format_args!("To see them set {} to the cut-off number", KEY_TRACE_LEVEL));
    recurse(1, cli.depth);

    if let Some(path) = &cli.redirect {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SinkError::Open {
                path: path.clone(),
                source: e,
            })?;
        rlog::info!("About to change log output. Check {}...", path.display());
        rlog::set_output(file);
        rlog::info!("This should go to the new log file");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    rlog::util::logging::init(cli.diagnostics);

    tracing::info!(
        version = rlog::util::constants::APP_VERSION,
        diagnostics = cli.diagnostics,
        "rlog-demo starting"
    );

    rlog::init();

    if let Err(e) = run(&cli) {
        let code = match &e {
            RlogError::Config(_) => 2,
            RlogError::Sink(_) => 1,
        };
        tracing::error!(error = %e, "rlog-demo failed");
        eprintln!("Error: {e}");
        std::process::exit(code);
    }
}
