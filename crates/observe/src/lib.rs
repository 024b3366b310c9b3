//! Shared observability setup: tracing subscriber initialization and a panic
//! hook that routes panics through the tracing pipeline.

mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
