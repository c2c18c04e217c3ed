//! Script engine interface
//!
//! The compiler/interpreter is an opaque collaborator. It reports failures
//! through the engine variants of [`crate::Error`] (`Compile`, `Runtime`,
//! `Debug`, `Launch`, `ExternalTool`) carrying its own message text.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::{Error, Result};

/// Receives the handle of the spawned process before any output arrives.
pub type StartCallback = Box<dyn FnOnce(ProcessHandle) + Send>;

/// Receives every line the running script prints.
pub type LineCallback = Arc<dyn Fn(String) + Send + Sync>;

#[async_trait]
pub trait ScriptEngine: Send + Sync {
    /// Compile `script` without running it.
    async fn compile(&self, script: &Path) -> Result<()>;

    /// Run `script` to completion. `on_start` fires once the process exists;
    /// `on_line`, when given, receives the process output line by line.
    async fn execute(
        &self,
        script: &Path,
        on_start: StartCallback,
        on_line: Option<LineCallback>,
    ) -> Result<()>;

    /// Launch `script` in its own process and return immediately.
    fn execute_detached(&self, script: &Path) -> Result<()>;

    /// Run `script` under the debugger.
    async fn debug(&self, script: &Path) -> Result<()>;

    /// Open an IDE project equivalent to `script`.
    fn open_external_project(&self, script: &Path) -> Result<()>;
}

/// Handle to a process started by [`ScriptEngine::execute`].
///
/// Cloning is cheap. Killing only requests termination; the engine that owns
/// the child performs it. Once the engine has finished with the process the
/// handle reports [`Error::ProcessTermination`].
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    pid: Option<u32>,
    kill_tx: mpsc::Sender<()>,
}

/// Engine side of a [`ProcessHandle`].
#[derive(Debug)]
pub struct KillSignal {
    rx: mpsc::Receiver<()>,
}

impl ProcessHandle {
    pub fn new(pid: Option<u32>) -> (Self, KillSignal) {
        let (kill_tx, rx) = mpsc::channel(1);
        (Self { pid, kill_tx }, KillSignal { rx })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn kill(&self) -> Result<()> {
        match self.kill_tx.try_send(()) {
            // A pending request already covers this one.
            Ok(()) | Err(TrySendError::Full(())) => Ok(()),
            Err(TrySendError::Closed(())) => Err(Error::ProcessTermination(format!(
                "process {} has already exited",
                self.pid.map(|p| p.to_string()).unwrap_or_else(|| "<unknown>".into())
            ))),
        }
    }
}

impl KillSignal {
    /// Resolves when a kill is requested. Never resolves if every handle
    /// was dropped without asking.
    pub async fn requested(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
