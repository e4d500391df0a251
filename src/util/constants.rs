// rlog - util/constants.rs
//
// Single source of truth for configuration key names, defaults, and limits.

// =============================================================================
// Crate metadata
// =============================================================================

/// Crate display name.
pub const APP_NAME: &str = "rlog";

/// Current crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `tracing` target prefix shared by the facility's own diagnostics.
pub const DIAGNOSTICS_TARGET: &str = "rlog";

// =============================================================================
// Configuration keys
// =============================================================================

/// Log level filter spec, e.g. `"INFO"` or `"net.rs=DEBUG,WARN"`.
pub const KEY_LOG_LEVEL: &str = "RLOG_LOG_LEVEL";

/// Trace depth filter spec, e.g. `"2"` or `"parser.rs=5,-1"`.
pub const KEY_TRACE_LEVEL: &str = "RLOG_TRACE_LEVEL";

/// Boolean: include `[dir/file:line (function)]` in every line.
pub const KEY_CALLER_INFO: &str = "RLOG_CALLER_INFO";

/// Named time format or a strftime pattern.
pub const KEY_TIME_FORMAT: &str = "RLOG_TIME_FORMAT";

/// Boolean: omit the timestamp entirely.
pub const KEY_LOG_NOTIME: &str = "RLOG_LOG_NOTIME";

/// Path of a file that receives log output (appended, created if absent).
pub const KEY_LOG_FILE: &str = "RLOG_LOG_FILE";

/// Stream selector: `stderr`, `stdout` or `none`.
pub const KEY_LOG_STREAM: &str = "RLOG_LOG_STREAM";

/// Path of the reloadable key=value configuration file.
pub const KEY_CONF_FILE: &str = "RLOG_CONF_FILE";

/// Seconds between checks of the configuration file.
pub const KEY_CONF_CHECK_INTERVAL: &str = "RLOG_CONF_CHECK_INTERVAL";

/// Every key the loader recognises, in documentation order.
pub const KNOWN_KEYS: &[&str] = &[
    KEY_LOG_LEVEL,
    KEY_TRACE_LEVEL,
    KEY_CALLER_INFO,
    KEY_TIME_FORMAT,
    KEY_LOG_NOTIME,
    KEY_LOG_FILE,
    KEY_LOG_STREAM,
    KEY_CONF_FILE,
    KEY_CONF_CHECK_INTERVAL,
];

// =============================================================================
// Filter defaults
// =============================================================================

/// Trace threshold meaning "no trace output".
pub const TRACE_DISABLED: i64 = -1;

// =============================================================================
// Output format
// =============================================================================

/// Column width the level decoration (`INFO`, `TRACE(3)`) is padded to.
pub const LEVEL_COLUMN_WIDTH: usize = 9;

/// Time format used when none (or an invalid one) is configured. RFC 3339.
pub const DEFAULT_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

// =============================================================================
// Configuration file limits
// =============================================================================

/// Default seconds between configuration file checks.
pub const DEFAULT_CONF_CHECK_INTERVAL_SECS: u64 = 15;

/// Configuration files larger than this are rejected.
pub const MAX_CONF_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Prefix marking a configuration file line that overrides the environment.
pub const CONF_OVERRIDE_PREFIX: char = '!';

/// Prefix marking a configuration file comment line.
pub const CONF_COMMENT_PREFIX: char = '#';
