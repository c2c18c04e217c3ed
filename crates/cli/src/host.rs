//! Terminal stand-ins for the editor and the output panel

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use script_runner_core::{EditorHost, OutputChannel, OutputSink};
use tracing::debug;

/// Editor host without an editor: the "current file" is whatever was last
/// opened, and files are always saved already.
#[derive(Debug, Default)]
pub struct TerminalEditor {
    current: Mutex<Option<PathBuf>>,
}

impl TerminalEditor {
    pub fn new(current: Option<PathBuf>) -> Self {
        Self {
            current: Mutex::new(current),
        }
    }
}

impl EditorHost for TerminalEditor {
    fn open_file(&self, path: &Path) -> script_runner_core::Result<()> {
        debug!("Opening {}", path.display());
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_path_buf());
        Ok(())
    }

    fn save_current_file(&self) -> script_runner_core::Result<()> {
        Ok(())
    }

    fn current_file_path(&self) -> Option<PathBuf> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn focus_editor(&self) {}

    fn show_message(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}

/// Prints every channel straight to stdout as lines arrive.
#[derive(Debug, Default)]
pub struct TerminalOutput {
    written: Mutex<HashMap<OutputChannel, usize>>,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for TerminalOutput {
    fn write_line(&self, channel: OutputChannel, line: &str) {
        *self
            .written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(channel)
            .or_default() += 1;
        println!("{line}");
    }

    fn clear(&self, channel: OutputChannel) {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&channel);
    }

    fn is_empty(&self, channel: OutputChannel) -> bool {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&channel)
            .is_none_or(|count| *count == 0)
    }

    fn show_channel(&self, channel: OutputChannel) {
        debug!("Showing {channel} output");
    }

    fn reset_caret(&self, _channel: OutputChannel) {}
}
