// rlog - app/global.rs
//
// The process-wide logger and the public per-level functions.
//
// The logger is built from the environment on first use and published
// through a OnceLock, so no caller can observe it half-constructed. Every
// public logging function is `#[track_caller]` and captures its call site
// directly; keep it that way when adding wrappers.

use crate::app::logger::Logger;
use crate::core::caller::Caller;
use crate::core::format::join_parts;
use crate::core::level::Level;
use crate::platform::config::Config;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, configured from `RLOG_*` on first access.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::from_env)
}

/// Build the process-wide logger now rather than on the first log call.
pub fn init() {
    let _ = logger();
}

/// Replace the process-wide settings with ones built from `config`.
///
/// With a watched configuration file, the next change to that file
/// rebuilds from the environment plus the file and discards `config`.
pub fn reconfigure(config: &Config) {
    logger().reconfigure(config);
}

/// Send all output to `writer` only.
pub fn set_output<W>(writer: W)
where
    W: std::io::Write + Send + 'static,
{
    logger().set_output(writer);
}

/// Watch `path` as the configuration file and apply it now.
pub fn set_conf_file(path: impl Into<PathBuf>) {
    logger().set_conf_file(path);
}

/// Re-read the `RLOG_*` environment variables and rebuild.
pub fn update_env() {
    logger().update_env();
}

// =============================================================================
// Plumbing shared by the level functions
// =============================================================================

fn log_parts<I>(caller: Caller, level: Level, parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut parts = Some(parts);
    logger().log(caller, level, &mut |buf: &mut String| {
        if let Some(parts) = parts.take() {
            join_parts(buf, parts);
        }
    });
}

fn log_args(caller: Caller, level: Level, args: fmt::Arguments<'_>) {
    logger().log(caller, level, &mut |buf: &mut String| {
        let _ = buf.write_fmt(args);
    });
}

/// Entry point for the level macros.
#[doc(hidden)]
#[track_caller]
pub fn __log(level: Level, function: &'static str, args: fmt::Arguments<'_>) {
    log_args(Caller::here(Some(function)), level, args);
}

/// Entry point for the `trace!` macro.
#[doc(hidden)]
#[track_caller]
pub fn __trace(depth: u32, function: &'static str, args: fmt::Arguments<'_>) {
    let caller = Caller::here(Some(function));
    logger().trace(caller, depth, &mut |buf: &mut String| {
        let _ = buf.write_fmt(args);
    });
}

// =============================================================================
// Level functions
// =============================================================================

/// Log `parts`, space separated, at DEBUG.
///
/// Caller info shows the function as `?`; use the `debug!` macro
/// to have the enclosing function named.
#[track_caller]
pub fn debug<I>(parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    log_parts(Caller::here(None), Level::Debug, parts);
}

/// Log formatted arguments at DEBUG. See also the `debug!` macro.
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    log_args(Caller::here(None), Level::Debug, args);
}

/// Log `parts`, space separated, at INFO.
///
/// Caller info shows the function as `?`; use the `info!` macro
/// to have the enclosing function named.
#[track_caller]
pub fn info<I>(parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    log_parts(Caller::here(None), Level::Info, parts);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    log_args(Caller::here(None), Level::Info, args);
}

/// Log `parts`, space separated, at WARN.
///
/// Caller info shows the function as `?`; use the `warn!` macro
/// to have the enclosing function named.
#[track_caller]
pub fn warn<I>(parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    log_parts(Caller::here(None), Level::Warn, parts);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    log_args(Caller::here(None), Level::Warn, args);
}

/// Log `parts`, space separated, at ERROR.
///
/// Caller info shows the function as `?`; use the `error!` macro
/// to have the enclosing function named.
#[track_caller]
pub fn error<I>(parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    log_parts(Caller::here(None), Level::Error, parts);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    log_args(Caller::here(None), Level::Error, args);
}

/// Log `parts`, space separated, at CRITICAL.
///
/// Caller info shows the function as `?`; use the `critical!` macro
/// to have the enclosing function named.
#[track_caller]
pub fn critical<I>(parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    log_parts(Caller::here(None), Level::Critical, parts);
}

#[track_caller]
pub fn criticalf(args: fmt::Arguments<'_>) {
    log_args(Caller::here(None), Level::Critical, args);
}

/// Log `parts`, space separated, as a trace message at `depth`.
///
/// Caller info shows the function as `?`; `trace!` names it.
///
/// Nearly free while tracing is disabled: the call returns before the
/// caller is resolved or anything is formatted.
#[track_caller]
pub fn trace<I>(depth: u32, parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let caller = Caller::here(None);
    let mut parts = Some(parts);
    logger().trace(caller, depth, &mut |buf: &mut String| {
        if let Some(parts) = parts.take() {
            join_parts(buf, parts);
        }
    });
}

/// Log formatted arguments as a trace message at `depth`.
#[track_caller]
pub fn tracef(depth: u32, args: fmt::Arguments<'_>) {
    let caller = Caller::here(None);
    logger().trace(caller, depth, &mut |buf: &mut String| {
        let _ = buf.write_fmt(args);
    });
}
