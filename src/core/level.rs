// rlog - core/level.rs
//
// Severity vocabulary. Pure data, no I/O.
//
// Level numbers grow with verbosity (NONE=0 .. TRACE=6). A message is
// admitted when its number is <= the configured threshold, which is the
// same comparison trace depths use against the trace threshold.

// =============================================================================
// Level
// =============================================================================

/// Severity levels, ordered from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Threshold only: disables all non-trace output.
    None = 0,
    Critical = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    /// Tag for numeric trace messages. Never selectable as a threshold.
    Trace = 6,
}

impl Level {
    /// Returns all variants in verbosity order.
    pub fn all() -> &'static [Level] {
        &[
            Level::None,
            Level::Critical,
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ]
    }

    /// Upper-case name as written in configuration and output.
    pub fn name(self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    /// Look up a level by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Level> {
        Level::all()
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    /// Numeric value compared against filter thresholds.
    pub fn number(self) -> i64 {
        i64::from(self as u8)
    }

    /// Whether this level may be configured as a log threshold.
    pub fn is_threshold(self) -> bool {
        self != Level::Trace
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
