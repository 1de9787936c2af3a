//! Engine-wide configuration

pub mod config;

pub use config::{ConfigError, EngineConfig};
