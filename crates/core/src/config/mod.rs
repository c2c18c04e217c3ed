//! Configuration management for script-runner

mod engine_config;
mod settings;

// Re-export main types
pub use engine_config::{CommandTemplate, EngineConfig};
pub use settings::{CONFIG_FILE_NAMES, Config};
