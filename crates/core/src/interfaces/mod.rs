//! Collaborator interfaces consumed by the orchestrator
//!
//! The editor, the output panel and the script engine live outside this
//! crate. The orchestrator reaches them only through these traits.

pub mod editor;
pub mod engine;
pub mod output;

pub use editor::EditorHost;
pub use engine::{KillSignal, LineCallback, ProcessHandle, ScriptEngine, StartCallback};
pub use output::OutputSink;
