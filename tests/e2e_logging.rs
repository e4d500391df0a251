// rlog - tests/e2e_logging.rs
//
// End-to-end tests for standalone Logger instances against the real
// filesystem: log files, configuration files and time formats. No mocks;
// caller attribution comes from the real call sites in this file.

use rlog::core::caller::Caller;
use rlog::util::constants::{KEY_CONF_CHECK_INTERVAL, KEY_CONF_FILE, KEY_LOG_STREAM};
use rlog::{Config, Level, Logger, RawConfig, StreamTarget};
use std::fs;
use std::path::Path;

// =============================================================================
// Helpers
// =============================================================================

#[track_caller]
fn say(logger: &Logger, level: Level, text: &str) {
    logger.log(Caller::here(None), level, &mut |buf: &mut String| {
        buf.push_str(text)
    });
}

#[track_caller]
fn trace(logger: &Logger, depth: u32, text: &str) {
    logger.trace(Caller::here(None), depth, &mut |buf: &mut String| {
        buf.push_str(text)
    });
}

fn file_config(path: &Path) -> Config {
    Config {
        no_time: true,
        log_stream: StreamTarget::None,
        log_file: Some(path.to_path_buf()),
        ..Config::default()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Log file
// =============================================================================

/// An existing log file is appended to, never truncated.
#[test]
fn e2e_log_file_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "earlier line\n").unwrap();

    let logger = Logger::new(&file_config(&path));
    say(&logger, Level::Warn, "Test Warning");

    assert_eq!(read_lines(&path), vec!["earlier line", "WARN     : Test Warning"]);
}

#[test]
fn e2e_directory_pattern_matches_parent_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pattern.log");
    let logger = Logger::new(&Config {
        log_level: "tests/e2e_*.rs=DEBUG,ERROR".to_string(),
        trace_level: "tests/*=2".to_string(),
        ..file_config(&path)
    });

    say(&logger, Level::Debug, "by directory");
    trace(&logger, 2, "traced");
    trace(&logger, 3, "too deep");

    assert_eq!(
        read_lines(&path),
        vec!["DEBUG    : by directory", "TRACE(2) : traced"]
    );
}

#[test]
fn e2e_caller_info_in_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caller.log");
    let logger = Logger::new(&Config {
        caller_info: true,
        ..file_config(&path)
    });

    let line = line!() + 1;
    say(&logger, Level::Info, "located");

    assert_eq!(
        read_lines(&path),
        vec![format!("INFO     : [tests/e2e_logging.rs:{line} (?)] located")]
    );
}

// =============================================================================
// Time formats
// =============================================================================

#[test]
fn e2e_named_time_format_prefixes_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kitchen.log");
    let logger = Logger::new(&Config {
        no_time: false,
        time_format: "Kitchen".to_string(),
        ..file_config(&path)
    });

    say(&logger, Level::Info, "clock");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    let (stamp, rest) = lines[0].split_once(' ').unwrap();
    assert!(
        stamp.ends_with("AM") || stamp.ends_with("PM"),
        "unexpected stamp {stamp:?}"
    );
    assert_eq!(rest, "INFO     : clock");
}

#[test]
fn e2e_invalid_custom_time_format_uses_rfc3339() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fallback.log");
    let logger = Logger::new(&Config {
        no_time: false,
        time_format: "%Q broken".to_string(),
        ..file_config(&path)
    });

    say(&logger, Level::Error, "fallback");

    let lines = read_lines(&path);
    let (stamp, rest) = lines[0].split_once(' ').unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp:?}");
    assert_eq!(rest, "ERROR    : fallback");
}

// =============================================================================
// Configuration file
// =============================================================================

#[test]
fn e2e_conf_file_configures_logger() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("conf.log");
    let conf_path = dir.path().join("rlog.conf");
    fs::write(
        &conf_path,
        format!(
            "# written by the test\n\
             RLOG_LOG_LEVEL = DEBUG\n\
             RLOG_LOG_NOTIME = yes\n\
             RLOG_TRACE_LEVEL = 1\n\
             RLOG_LOG_FILE = {}\n",
            log_path.display()
        ),
    )
    .unwrap();

    let logger = Logger::from_raw(RawConfig::from_pairs([
        (KEY_CONF_FILE, conf_path.to_str().unwrap()),
        (KEY_CONF_CHECK_INTERVAL, "0"),
        (KEY_LOG_STREAM, "none"),
    ]));

    say(&logger, Level::Debug, "from conf");
    trace(&logger, 1, "trace one");
    trace(&logger, 2, "trace two");

    assert_eq!(
        read_lines(&log_path),
        vec!["DEBUG    : from conf", "TRACE(1) : trace one"]
    );
}

#[test]
fn e2e_conf_override_beats_base_value() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("override.log");
    let conf_path = dir.path().join("rlog.conf");
    fs::write(
        &conf_path,
        format!(
            "RLOG_LOG_LEVEL = DEBUG\n\
             !RLOG_LOG_STREAM = none\n\
             RLOG_LOG_NOTIME = 1\n\
             RLOG_LOG_FILE = {}\n",
            log_path.display()
        ),
    )
    .unwrap();

    let logger = Logger::from_raw(RawConfig::from_pairs([
        (KEY_CONF_FILE, conf_path.to_str().unwrap()),
        (KEY_CONF_CHECK_INTERVAL, "0"),
        (KEY_LOG_STREAM, "stderr"),
        ("RLOG_LOG_LEVEL", "ERROR"),
    ]));

    // Base ERROR wins over the plain DEBUG line; the '!' line silences stderr.
    say(&logger, Level::Warn, "hidden");
    say(&logger, Level::Error, "shown");

    assert_eq!(read_lines(&log_path), vec!["ERROR    : shown"]);
    assert_eq!(logger.settings().sinks().len(), 1);
}

#[test]
fn e2e_missing_conf_file_keeps_base() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("base.log");
    let logger = Logger::from_raw(RawConfig::from_pairs([
        (KEY_CONF_FILE, dir.path().join("absent.conf").to_str().unwrap()),
        (KEY_CONF_CHECK_INTERVAL, "0"),
        (KEY_LOG_STREAM, "none"),
        ("RLOG_LOG_NOTIME", "true"),
        ("RLOG_LOG_FILE", log_path.to_str().unwrap()),
    ]));

    say(&logger, Level::Info, "base only");

    assert_eq!(read_lines(&log_path), vec!["INFO     : base only"]);
}
