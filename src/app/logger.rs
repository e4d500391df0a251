// rlog - app/logger.rs
//
// The emission pipeline and the swappable settings it reads.
//
// Architecture:
//   - The active Settings live behind `RwLock<Arc<Settings>>`. A log call
//     takes the read lock only long enough to clone the Arc, then works on
//     that snapshot, so every line is produced from exactly one snapshot.
//   - Reconfiguration builds a complete new Settings outside the lock and
//     publishes it with a single pointer swap under the write lock.
//   - The optional configuration file is checked lazily from the log path,
//     at most once per check interval and only by one caller at a time
//     (`try_lock`). No background thread is involved.
//
// Nothing in here returns an error to the logging caller. Failures become
// degraded behaviour plus a diagnostic `tracing` event.

use crate::app::settings::Settings;
use crate::core::caller::{Caller, CallerResolver, LocationResolver};
use crate::core::format::{compose_line, LineParts};
use crate::core::level::Level;
use crate::platform::config::{read_conf_file, Config, RawConfig};
use crate::platform::sink::Sink;
use crate::util::error::ConfigError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, TryLockError};
use std::time::{Duration, Instant, SystemTime};

/// Deferred message body: called with the output buffer only after the
/// filter has admitted the line.
pub type BodyWriter<'a> = &'a mut dyn FnMut(&mut String);

// =============================================================================
// Configuration file watch
// =============================================================================

/// Where settings come from when they are rebuilt from configuration.
struct ConfSource {
    /// Environment (or other externally supplied) values.
    base: RawConfig,
    watch: Option<ConfWatch>,
}

struct ConfWatch {
    path: PathBuf,
    interval: Duration,
    last_check: Instant,
    /// Modification time and size seen at the last load.
    fingerprint: Option<(SystemTime, u64)>,
}

impl ConfWatch {
    fn new(path: PathBuf, interval: Duration) -> Self {
        let fingerprint = fingerprint(&path);
        Self {
            path,
            interval,
            last_check: Instant::now(),
            fingerprint,
        }
    }
}

fn fingerprint(path: &Path) -> Option<(SystemTime, u64)> {
    let metadata = std::fs::metadata(path).ok()?;
    Some((metadata.modified().ok()?, metadata.len()))
}

/// Merge the configuration file (if any) over `base` and type the result.
fn load_config(base: &RawConfig, conf_file: Option<&Path>) -> Config {
    let raw = match conf_file {
        Some(path) => match read_conf_file(path) {
            Ok(entries) => base.merged_with(&entries),
            Err(e) => {
                tracing::warn!(error = %e, "Configuration file unavailable, using environment only");
                base.clone()
            }
        },
        None => base.clone(),
    };
    Config::from_raw(&raw)
}

/// Like `load_config`, for a file that changed while running.
///
/// A removed file reverts to `base`. Any other failure (oversized file,
/// unreadable file) returns `None` and the current settings stay.
fn reload_config(base: &RawConfig, conf_file: &Path) -> Option<Config> {
    match read_conf_file(conf_file) {
        Ok(entries) => Some(Config::from_raw(&base.merged_with(&entries))),
        Err(ConfigError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %conf_file.display(), "Configuration file removed, using environment only");
            Some(Config::from_raw(base))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Configuration file rejected, keeping current settings");
            None
        }
    }
}

// =============================================================================
// Logger
// =============================================================================

/// A logging facility instance. The process-wide one lives in `app::global`.
pub struct Logger {
    settings: RwLock<Arc<Settings>>,
    resolver: Box<dyn CallerResolver>,
    source: Mutex<ConfSource>,
    /// Fast-path flag: a configuration file with a non-zero check interval
    /// is being watched.
    watching: AtomicBool,
}

impl Logger {
    /// Logger driven by an explicit configuration, no configuration file.
    pub fn new(config: &Config) -> Self {
        Self {
            settings: RwLock::new(Arc::new(Settings::initialize(config))),
            resolver: Box::new(LocationResolver),
            source: Mutex::new(ConfSource {
                base: RawConfig::default(),
                watch: None,
            }),
            watching: AtomicBool::new(false),
        }
    }

    /// Logger driven by raw key/value configuration. If the values name a
    /// configuration file, it is applied now and watched afterwards.
    pub fn from_raw(raw: RawConfig) -> Self {
        let watch = raw
            .conf_file()
            .map(|path| ConfWatch::new(path, raw.conf_check_interval()));
        let config = load_config(&raw, watch.as_ref().map(|w| w.path.as_path()));
        let watching = watch.as_ref().is_some_and(|w| !w.interval.is_zero());

        Self {
            settings: RwLock::new(Arc::new(Settings::initialize(&config))),
            resolver: Box::new(LocationResolver),
            source: Mutex::new(ConfSource { base: raw, watch }),
            watching: AtomicBool::new(watching),
        }
    }

    /// Logger configured from the `RLOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_raw(RawConfig::from_env())
    }

    /// Replace the caller resolver.
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: CallerResolver + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// The snapshot currently in effect.
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rebuild settings from `config` and swap them in atomically.
    ///
    /// `config` is not remembered as a base. If a configuration file is
    /// watched, its next change rebuilds from the environment plus the file
    /// and every value set here is dropped, including keys the file never
    /// mentions. Use [`Logger::update_base`] for values that must survive.
    pub fn reconfigure(&self, config: &Config) {
        self.publish(Settings::initialize(config));
        tracing::debug!("Settings replaced by explicit reconfiguration");
    }

    /// Send all output to `writer` only, dropping any stream or file sink.
    pub fn set_output<W>(&self, writer: W)
    where
        W: std::io::Write + Send + 'static,
    {
        let mut slot = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        let redirected = slot.with_sinks(vec![Arc::new(Sink::writer(writer))]);
        *slot = Arc::new(redirected);
    }

    /// Watch `path` as the configuration file and apply it immediately.
    pub fn set_conf_file(&self, path: impl Into<PathBuf>) {
        let mut source = self.lock_source();
        let watch = ConfWatch::new(path.into(), source.base.conf_check_interval());
        let config = load_config(&source.base, Some(&watch.path));
        self.watching
            .store(!watch.interval.is_zero(), Ordering::Relaxed);
        tracing::debug!(path = %watch.path.display(), "Configuration file set");
        source.watch = Some(watch);
        self.publish(Settings::initialize(&config));
    }

    /// Replace the base configuration (normally re-read from the
    /// environment) and rebuild. A configuration file named in `raw`
    /// replaces the watched one; otherwise the current watch is kept.
    pub fn update_base(&self, raw: RawConfig) {
        let mut source = self.lock_source();
        if let Some(path) = raw.conf_file() {
            source.watch = Some(ConfWatch::new(path, raw.conf_check_interval()));
        } else if let Some(watch) = source.watch.as_mut() {
            watch.interval = raw.conf_check_interval();
        }
        source.base = raw;
        let watching = source.watch.as_ref().is_some_and(|w| !w.interval.is_zero());
        self.watching.store(watching, Ordering::Relaxed);

        let config = load_config(&source.base, source.watch.as_ref().map(|w| w.path.as_path()));
        self.publish(Settings::initialize(&config));
    }

    /// Re-read the environment as the new base configuration.
    pub fn update_env(&self) {
        self.update_base(RawConfig::from_env());
    }

    /// Emit a message at a severity level.
    ///
    /// `Level::None` is a threshold only and `Level::Trace` messages go
    /// through [`Logger::trace`]; both are ignored here.
    pub fn log(&self, caller: Caller, level: Level, body: BodyWriter<'_>) {
        if matches!(level, Level::None | Level::Trace) {
            return;
        }
        self.check_conf_file();
        let settings = self.settings();
        self.emit(&settings, &caller, level, None, body);
    }

    /// Emit a trace message at `depth`.
    ///
    /// When the trace spec is empty this returns before any caller
    /// resolution or formatting.
    pub fn trace(&self, caller: Caller, depth: u32, body: BodyWriter<'_>) {
        self.check_conf_file();
        let settings = self.settings();
        if settings.trace_spec().is_empty() {
            return;
        }
        self.emit(&settings, &caller, Level::Trace, Some(depth), body);
    }

    fn emit(
        &self,
        settings: &Settings,
        caller: &Caller,
        level: Level,
        depth: Option<u32>,
        body: BodyWriter<'_>,
    ) {
        let (spec, candidate) = match depth {
            Some(depth) => (settings.trace_spec(), i64::from(depth)),
            None => (settings.log_spec(), level.number()),
        };

        // The filename is only needed for pattern rules or the caller segment.
        let site = if settings.show_caller_info() || spec.has_patterns() {
            self.resolver.resolve(caller)
        } else {
            None
        };
        let filename = site.as_ref().map_or("", |s| s.module_and_file.as_ref());
        if !spec.matches(filename, candidate) {
            return;
        }

        let mut message = String::new();
        body(&mut message);
        let timestamp = settings.timestamp();
        let line = compose_line(&LineParts {
            timestamp: timestamp.as_deref(),
            level,
            depth,
            caller: site.as_ref().filter(|_| settings.show_caller_info()),
            message: &message,
        });

        for sink in settings.sinks() {
            if let Err(e) = sink.write_line(&line) {
                tracing::debug!(sink = %sink.describe(), error = %e, "Log write failed");
            }
        }
    }

    fn publish(&self, settings: Settings) {
        let next = Arc::new(settings);
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn lock_source(&self) -> std::sync::MutexGuard<'_, ConfSource> {
        self.source.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload the configuration file if the check interval has passed and
    /// the file changed. Callers that find another thread mid-check skip.
    fn check_conf_file(&self) {
        if !self.watching.load(Ordering::Relaxed) {
            return;
        }
        let mut source = match self.source.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        let ConfSource { base, watch } = &mut *source;
        let Some(watch) = watch.as_mut() else {
            return;
        };
        if watch.interval.is_zero() || watch.last_check.elapsed() < watch.interval {
            return;
        }
        watch.last_check = Instant::now();

        let current = fingerprint(&watch.path);
        if current == watch.fingerprint {
            return;
        }
        watch.fingerprint = current;

        let Some(config) = reload_config(base, &watch.path) else {
            return;
        };
        self.publish(Settings::initialize(&config));
        tracing::info!(path = %watch.path.display(), "Configuration file changed, settings reloaded");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
