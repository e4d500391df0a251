// rlog - platform/mod.rs
//
// Platform layer: environment and configuration file loading, output sinks.
// Must NOT depend on: app.

pub mod config;
pub mod sink;
