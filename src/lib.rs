//! Fixtures shared by the workspace integration tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway directory of script files.
pub struct ScriptWorkspace {
    dir: TempDir,
}

impl ScriptWorkspace {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `config` as the workspace's `.script-runner.json`.
    pub fn write_config(&self, config: &serde_json::Value) -> io::Result<PathBuf> {
        let text = serde_json::to_string_pretty(config).map_err(io::Error::other)?;
        self.write(".script-runner.json", &text)
    }

    /// Canonical form of a workspace path, as it appears in a resolved project.
    pub fn canonical(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        self.dir.path().join(relative).canonicalize()
    }
}
