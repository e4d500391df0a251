// rlog - platform/config.rs
//
// Configuration loading: environment variables and the optional key=value
// configuration file are gathered into a RawConfig (plain strings), which
// is then converted leniently into the typed Config the core consumes.
//
// Unknown keys and unparsable values are ignored and the documented
// default is used instead. Nothing in here is ever fatal.
//
// Configuration file format:
//
//   # comment
//   RLOG_LOG_LEVEL = net.rs=DEBUG,WARN
//   !RLOG_TRACE_LEVEL = 2        <- '!' overrides the environment
//
// Without '!', a value already present in the environment wins.

use crate::util::constants::{
    CONF_COMMENT_PREFIX, CONF_OVERRIDE_PREFIX, DEFAULT_CONF_CHECK_INTERVAL_SECS, KEY_CALLER_INFO,
    KEY_CONF_CHECK_INTERVAL, KEY_CONF_FILE, KEY_LOG_FILE, KEY_LOG_LEVEL, KEY_LOG_NOTIME,
    KEY_LOG_STREAM, KEY_TIME_FORMAT, KEY_TRACE_LEVEL, KNOWN_KEYS, MAX_CONF_FILE_SIZE,
};
use crate::util::error::ConfigError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Typed configuration
// =============================================================================

/// Which standard stream receives log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamTarget {
    #[default]
    Stderr,
    Stdout,
    /// No stream; only the log file (if any) receives output.
    None,
}

impl StreamTarget {
    /// Parse a selector case-insensitively. Unknown values select stderr.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdout" => Self::Stdout,
            "none" => Self::None,
            "stderr" | "" => Self::Stderr,
            other => {
                tracing::debug!(value = other, "Unknown log stream selector, using stderr");
                Self::Stderr
            }
        }
    }
}

/// Typed configuration consumed by `Settings::initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Log level filter spec. Empty means INFO.
    pub log_level: String,
    /// Trace depth filter spec. Empty means disabled.
    pub trace_level: String,
    /// Include `[dir/file:line (function)]` in every line.
    pub caller_info: bool,
    /// Named time format or strftime pattern. Empty means RFC 3339.
    pub time_format: String,
    /// Omit the timestamp entirely.
    pub no_time: bool,
    /// File that receives output in addition to the stream.
    pub log_file: Option<PathBuf>,
    pub log_stream: StreamTarget,
}

impl Config {
    /// Convert raw strings leniently; anything unparsable keeps its default.
    pub fn from_raw(raw: &RawConfig) -> Self {
        let mut config = Config::default();

        if let Some(level) = raw.get(KEY_LOG_LEVEL) {
            config.log_level = level.to_string();
        }
        if let Some(trace) = raw.get(KEY_TRACE_LEVEL) {
            config.trace_level = trace.to_string();
        }
        if let Some(flag) = raw.get(KEY_CALLER_INFO).and_then(parse_bool) {
            config.caller_info = flag;
        }
        if let Some(format) = raw.get(KEY_TIME_FORMAT) {
            config.time_format = format.to_string();
        }
        if let Some(flag) = raw.get(KEY_LOG_NOTIME).and_then(parse_bool) {
            config.no_time = flag;
        }
        if let Some(file) = raw.get(KEY_LOG_FILE) {
            if !file.is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }
        if let Some(stream) = raw.get(KEY_LOG_STREAM) {
            config.log_stream = StreamTarget::parse(stream);
        }

        config
    }
}

/// Parse a boolean flag: `1 t true y yes` / `0 f false n no`, any case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" => Some(true),
        "0" | "f" | "false" | "n" | "no" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Raw key/value configuration
// =============================================================================

/// Recognised configuration keys and their raw string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    values: BTreeMap<String, String>,
}

impl RawConfig {
    /// Collect the recognised `RLOG_*` variables from the environment.
    /// Unset and empty variables are left out.
    pub fn from_env() -> Self {
        Self::from_pairs(
            KNOWN_KEYS
                .iter()
                .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))),
        )
    }

    /// Build from any key/value source. Unknown keys and empty values are
    /// ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            if !KNOWN_KEYS.contains(&key) {
                tracing::debug!(key, "Unknown configuration key, ignoring");
                continue;
            }
            if !value.is_empty() {
                values.insert(key.to_string(), value.to_string());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Layer configuration file entries over this (environment) base.
    ///
    /// An entry applies when it is marked `!` or when the base has no value
    /// for its key. The configuration file cannot name another
    /// configuration file.
    pub fn merged_with(&self, entries: &[ConfEntry]) -> RawConfig {
        let mut merged = self.clone();
        for entry in entries {
            if entry.key == KEY_CONF_FILE {
                tracing::debug!("{KEY_CONF_FILE} is ignored inside a configuration file");
                continue;
            }
            if entry.overrides_env || !self.values.contains_key(&entry.key) {
                if entry.value.is_empty() {
                    merged.values.remove(&entry.key);
                } else {
                    merged.values.insert(entry.key.clone(), entry.value.clone());
                }
            }
        }
        merged
    }

    /// Path of the configuration file to watch, if one is configured.
    pub fn conf_file(&self) -> Option<PathBuf> {
        self.get(KEY_CONF_FILE).map(PathBuf::from)
    }

    /// How often the configuration file is re-checked. Zero means never.
    pub fn conf_check_interval(&self) -> Duration {
        let secs = self
            .get(KEY_CONF_CHECK_INTERVAL)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CONF_CHECK_INTERVAL_SECS);
        Duration::from_secs(secs)
    }

    /// Set or replace a single value (ignored for unknown keys).
    pub fn set(&mut self, key: &str, value: &str) {
        if KNOWN_KEYS.contains(&key) {
            self.values.insert(key.to_string(), value.to_string());
        }
    }
}

// =============================================================================
// Configuration file
// =============================================================================

/// One `KEY = value` line from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfEntry {
    pub key: String,
    pub value: String,
    /// Line was prefixed with `!`.
    pub overrides_env: bool,
}

/// Parse configuration file content. Malformed lines and unknown keys are
/// skipped.
pub fn parse_conf(content: &str) -> Vec<ConfEntry> {
    let mut entries = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(CONF_COMMENT_PREFIX) {
            continue;
        }
        let (overrides_env, line) = match line.strip_prefix(CONF_OVERRIDE_PREFIX) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, line),
        };
        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line_number = idx + 1, "Malformed configuration line, skipping");
            continue;
        };
        let key = key.trim();
        if !KNOWN_KEYS.contains(&key) {
            tracing::debug!(line_number = idx + 1, key, "Unknown configuration key, skipping");
            continue;
        }
        entries.push(ConfEntry {
            key: key.to_string(),
            value: value.trim().to_string(),
            overrides_env,
        });
    }
    entries
}

/// Read and parse the configuration file.
pub fn read_conf_file(path: &Path) -> Result<Vec<ConfEntry>, ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > MAX_CONF_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_CONF_FILE_SIZE,
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_conf(&content))
}
