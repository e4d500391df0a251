// rlog - app/mod.rs
//
// Application layer: settings snapshots, the logger that owns and swaps
// them, and the process-wide instance behind the public functions.
// Dependencies: core, platform.

pub mod global;
pub mod logger;
pub mod settings;
