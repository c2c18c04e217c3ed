//! script-runner - A session engine for building and running script projects
//!
//! This crate provides functionality to:
//! - Resolve a script's `//css_*` directives into a project of sources and assemblies
//! - Build, run and debug the loaded script through a pluggable script engine
//! - Track the running script process so it can be stopped
//! - Notify front ends about session state changes
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod orchestrator;
pub mod parser;
pub mod project;
pub mod services;
pub mod session;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use interfaces::{EditorHost, OutputSink, ProcessHandle, ScriptEngine};
pub use orchestrator::{Orchestrator, StopOutcome, TaskHandle};
pub use project::ProjectModel;
pub use services::{BufferedOutput, CommandEngine};
pub use session::SessionEvent;
