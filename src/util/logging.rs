// rlog - util/logging.rs
//
// Subscriber setup for the facility's own diagnostics.
//
// rlog never writes problems about itself into its sinks. Malformed filter
// tokens, unreadable configuration files, sinks that cannot be opened and
// failed writes are emitted as `tracing` events under `rlog::*` targets.
// Without a subscriber they go nowhere; a program that wants to see them
// calls `init` once at startup.
//
// Priority: RUST_LOG env var > debug flag > default "warn".

use tracing_subscriber::EnvFilter;

/// Default filter for rlog's own diagnostics.
const DEFAULT_DIAGNOSTICS_FILTER: &str = "warn";

/// Install a stderr subscriber for rlog's diagnostics.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn init(debug_flag: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new(format!(
            "{}=debug",
            super::constants::DIAGNOSTICS_TARGET
        ))
    } else {
        EnvFilter::new(DEFAULT_DIAGNOSTICS_FILTER)
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    if installed.is_ok() {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Diagnostics initialised"
        );
    }
}
