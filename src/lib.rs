// rlog - lib.rs
//
// Process-wide leveled and trace logging configured through `RLOG_*`
// environment variables and an optional configuration file.
//
//     rlog::info(["listening on", addr]);
//     rlog::warn!("retry {} of {}", n, max);
//     rlog::trace!(2, "entering {}", name);
//
// The plain functions join their arguments with single spaces. The macros
// take `format!` syntax and also record the enclosing function name.

mod macros;

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::global::{
    critical, criticalf, debug, debugf, error, errorf, info, infof, init, logger, reconfigure,
    set_conf_file, set_output, trace, tracef, update_env, warn, warnf,
};
pub use crate::app::logger::Logger;
pub use crate::app::settings::Settings;
pub use crate::core::level::Level;
pub use crate::platform::config::{Config, RawConfig, StreamTarget};
pub use crate::util::error::{Result, RlogError};
