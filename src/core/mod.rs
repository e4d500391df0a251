// rlog - core/mod.rs
//
// Core logic: level vocabulary, filter compilation and matching, caller
// attribution, line formatting.
// Must NOT depend on: platform or app.

pub mod caller;
pub mod filter;
pub mod format;
pub mod level;
