//! Shared utilities for script2stock
//!
//! This crate provides the logging setup and the user settings used by the
//! script2stock binaries.

pub mod config;
pub mod logging;

pub use config::{ConfigError, Settings};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
