// rlog - app/settings.rs
//
// Immutable settings snapshot. Built in one step from a Config and never
// mutated afterwards; reconfiguration builds a new snapshot and swaps it
// in whole (see app::logger).

use crate::core::filter::FilterSpec;
use crate::core::format::TimeFormat;
use crate::platform::config::Config;
use crate::platform::sink::Sink;
use std::sync::Arc;

/// Everything a log call needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Settings {
    log_spec: FilterSpec,
    trace_spec: FilterSpec,
    show_caller_info: bool,
    /// `None` when timestamps are switched off.
    time_format: Option<TimeFormat>,
    /// Stream first, then file. At most two.
    sinks: Vec<Arc<Sink>>,
}

impl Settings {
    /// Build a snapshot from configuration.
    ///
    /// A log file that cannot be opened is left out and the remaining sinks
    /// are used.
    pub fn initialize(config: &Config) -> Self {
        let time_format = if config.no_time {
            None
        } else {
            Some(TimeFormat::resolve(&config.time_format))
        };

        let settings = Self {
            log_spec: FilterSpec::log_levels(&config.log_level),
            trace_spec: FilterSpec::trace_levels(&config.trace_level),
            show_caller_info: config.caller_info,
            time_format,
            sinks: resolve_sinks(config),
        };

        tracing::debug!(
            log_filters = settings.log_spec.filters().len(),
            trace_filters = settings.trace_spec.filters().len(),
            caller_info = settings.show_caller_info,
            sinks = ?settings.sinks,
            "Settings initialised"
        );

        settings
    }

    /// Copy of this snapshot writing to `sinks` instead.
    pub fn with_sinks(&self, sinks: Vec<Arc<Sink>>) -> Self {
        Self {
            sinks,
            ..self.clone()
        }
    }

    pub fn log_spec(&self) -> &FilterSpec {
        &self.log_spec
    }

    pub fn trace_spec(&self) -> &FilterSpec {
        &self.trace_spec
    }

    pub fn show_caller_info(&self) -> bool {
        self.show_caller_info
    }

    pub fn time_format(&self) -> Option<&TimeFormat> {
        self.time_format.as_ref()
    }

    pub fn sinks(&self) -> &[Arc<Sink>] {
        &self.sinks
    }

    /// Current time in the configured format, or `None` if disabled.
    pub fn timestamp(&self) -> Option<String> {
        self.time_format.as_ref().map(TimeFormat::now)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::initialize(&Config::default())
    }
}

fn resolve_sinks(config: &Config) -> Vec<Arc<Sink>> {
    let mut sinks = Vec::with_capacity(2);
    if let Some(stream) = Sink::stream(config.log_stream) {
        sinks.push(Arc::new(stream));
    }
    if let Some(path) = &config.log_file {
        match Sink::open_file(path) {
            Ok(file) => sinks.push(Arc::new(file)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Log file unavailable, continuing without it");
            }
        }
    }
    sinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::StreamTarget;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_spec(), &FilterSpec::log_levels("INFO"));
        assert!(settings.trace_spec().is_empty());
        assert!(!settings.show_caller_info());
        assert_eq!(settings.time_format(), Some(&TimeFormat::default()));
        assert_eq!(settings.sinks().len(), 1);
        assert!(matches!(*settings.sinks()[0], Sink::Stderr));
    }

    #[test]
    fn test_no_time_removes_timestamp() {
        let settings = Settings::initialize(&Config {
            no_time: true,
            time_format: "ANSIC".to_string(),
            ..Config::default()
        });
        assert!(settings.time_format().is_none());
        assert!(settings.timestamp().is_none());
    }

    #[test]
    fn test_stream_and_file_both_configured() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::initialize(&Config {
            log_stream: StreamTarget::Stdout,
            log_file: Some(dir.path().join("both.log")),
            ..Config::default()
        });
        let sinks = settings.sinks();
        assert_eq!(sinks.len(), 2);
        assert!(matches!(*sinks[0], Sink::Stdout));
        assert!(matches!(*sinks[1], Sink::File { .. }));
    }

    #[test]
    fn test_stream_none_leaves_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::initialize(&Config {
            log_stream: StreamTarget::None,
            log_file: Some(dir.path().join("only.log")),
            ..Config::default()
        });
        assert_eq!(settings.sinks().len(), 1);
        assert!(matches!(*settings.sinks()[0], Sink::File { .. }));
    }

    #[test]
    fn test_unopenable_file_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::initialize(&Config {
            log_file: Some(dir.path().join("missing").join("x.log")),
            ..Config::default()
        });
        assert_eq!(settings.sinks().len(), 1);
        assert!(matches!(*settings.sinks()[0], Sink::Stderr));
    }

    #[test]
    fn test_with_sinks_keeps_filters() {
        let settings = Settings::initialize(&Config {
            log_level: "DEBUG".to_string(),
            ..Config::default()
        });
        let redirected = settings.with_sinks(vec![Arc::new(Sink::writer(Vec::new()))]);
        assert_eq!(redirected.log_spec(), settings.log_spec());
        assert!(matches!(*redirected.sinks()[0], Sink::Writer(_)));
    }
}
