// rlog - platform/sink.rs
//
// Output destinations. Each sink serialises its own writes so concurrent
// callers never interleave partial lines: the standard streams through
// their process-wide locks, files and caller-supplied writers through a
// mutex held for the whole line.

use crate::platform::config::StreamTarget;
use crate::util::error::SinkError;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A destination that receives formatted log lines.
pub enum Sink {
    Stderr,
    Stdout,
    /// Log file opened for appending.
    File { path: PathBuf, file: Mutex<File> },
    /// Caller-supplied destination installed via `set_output`.
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Sink {
    /// Sink for a stream selector; `None` for `StreamTarget::None`.
    pub fn stream(target: StreamTarget) -> Option<Sink> {
        match target {
            StreamTarget::Stderr => Some(Sink::Stderr),
            StreamTarget::Stdout => Some(Sink::Stdout),
            StreamTarget::None => None,
        }
    }

    /// Open `path` for appending, creating it if absent.
    pub fn open_file(path: &Path) -> Result<Sink, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SinkError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Sink::File {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn writer<W>(writer: W) -> Sink
    where
        W: Write + Send + 'static,
    {
        Sink::Writer(Mutex::new(Box::new(writer)))
    }

    /// Write one complete line.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Sink::Stderr => {
                let mut handle = io::stderr().lock();
                handle.write_all(line.as_bytes())
            }
            Sink::Stdout => {
                let mut handle = io::stdout().lock();
                handle.write_all(line.as_bytes())?;
                handle.flush()
            }
            Sink::File { file, .. } => {
                // A panic in another writer leaves the file itself usable.
                let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                file.write_all(line.as_bytes())
            }
            Sink::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writer.write_all(line.as_bytes())?;
                writer.flush()
            }
        }
    }

    /// Short label for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Sink::Stderr => "stderr".to_string(),
            Sink::Stdout => "stdout".to_string(),
            Sink::File { path, .. } => path.display().to_string(),
            Sink::Writer(_) => "custom writer".to_string(),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sink({})", self.describe())
    }
}
