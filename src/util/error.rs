// rlog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
//
// Only the loader and sink helpers return these. The logging calls
// themselves never fail: every error below is turned into degraded
// behaviour plus a diagnostic event at the point where it is caught.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for rlog helper operations.
#[derive(Debug)]
pub enum RlogError {
    /// Configuration file loading failed.
    Config(ConfigError),

    /// An output sink could not be set up.
    Sink(SinkError),
}

impl fmt::Display for RlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Sink(e) => write!(f, "Sink error: {e}"),
        }
    }
}

impl std::error::Error for RlogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Sink(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to reading the key=value configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// I/O error reading the file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::FileTooLarge { .. } => None,
        }
    }
}

impl From<ConfigError> for RlogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

/// Errors related to output sinks.
#[derive(Debug)]
pub enum SinkError {
    /// The log file could not be opened for appending.
    Open { path: PathBuf, source: io::Error },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open log file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
        }
    }
}

impl From<SinkError> for RlogError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

/// Convenience type alias for rlog results.
pub type Result<T> = std::result::Result<T, RlogError>;
