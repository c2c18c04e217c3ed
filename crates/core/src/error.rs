use std::io;
use std::path::PathBuf;

/// Errors that can occur during script-runner operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid script '{}': {reason}", path.display())]
    InvalidScript { path: PathBuf, reason: String },

    #[error("Please load some script file first.")]
    NoScriptLoaded,

    #[error("A script is currently running")]
    ScriptRunning,

    // Engine failures render as the engine's own text so they can be
    // written to an output channel unchanged.
    #[error("{0}")]
    Compile(String),

    #[error("{0}")]
    Runtime(String),

    #[error("{0}")]
    Debug(String),

    #[error("{0}")]
    Launch(String),

    #[error("{0}")]
    ExternalTool(String),

    #[error("Failed to terminate script process: {0}")]
    ProcessTermination(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_script(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidScript {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for script-runner operations
pub type Result<T> = std::result::Result<T, Error>;
