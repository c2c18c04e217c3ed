//! Editor host interface
//!
//! The text editor that owns the open documents. The orchestrator only asks
//! it to open, save and focus files; it never inspects editor internals.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for the editor hosting the script session
pub trait EditorHost: Send + Sync {
    /// Open `path` in the editor (or switch to it if already open)
    fn open_file(&self, path: &Path) -> Result<()>;

    /// Save the active document
    fn save_current_file(&self) -> Result<()>;

    /// Full path of the active document, if it has one
    fn current_file_path(&self) -> Option<PathBuf>;

    /// Move keyboard focus to the editing surface
    fn focus_editor(&self);

    /// Blocking notification the user has to acknowledge
    fn show_message(&self, message: &str);
}
