//! [`ScriptEngine`] backed by external command-line tools

use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    command::ScriptCommand,
    config::{CommandTemplate, EngineConfig},
    error::{Error, Result},
    interfaces::{LineCallback, ProcessHandle, ScriptEngine, StartCallback},
};

/// Runs the configured `compile`/`run`/`debug`/`open_external` templates.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    config: EngineConfig,
}

impl CommandEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self, template: &CommandTemplate, script: &Path) -> ScriptCommand {
        ScriptCommand::from_template(template, script)
    }
}

/// Run to completion, returning the exit status and stdout followed by stderr.
async fn run_to_completion(command: &ScriptCommand) -> std::io::Result<(ExitStatus, String)> {
    let mut cmd = command.to_tokio_command();
    cmd.stdin(Stdio::null());
    let output = cmd.output().await?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok((output.status, text.trim_end().to_string()))
}

fn failure_text(command: &ScriptCommand, status: ExitStatus, text: String) -> String {
    if text.is_empty() {
        format!("{} exited with {status}", command.program)
    } else {
        text
    }
}

async fn forward_lines<R: AsyncRead + Unpin>(reader: R, on_line: LineCallback) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => (*on_line)(line),
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read script output: {e}");
                break;
            }
        }
    }
}

/// How long output is still drained after the script process is gone.
/// Processes the script left behind may hold the pipes open indefinitely.
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

async fn finish_readers(mut readers: Vec<JoinHandle<()>>) {
    let drained = tokio::time::timeout(OUTPUT_DRAIN_TIMEOUT, async {
        for reader in readers.iter_mut() {
            if let Err(e) = reader.await {
                warn!("Script output reader failed: {e}");
            }
        }
    })
    .await;

    if drained.is_err() {
        debug!("Script output still open after exit, detaching readers");
        for reader in &readers {
            reader.abort();
        }
    }
}

/// Kill the script's whole process group, then the script itself.
async fn terminate(child: &mut Child) -> Result<()> {
    let pid = child.id();
    info!("Terminating script process {:?}", pid);

    #[cfg(unix)]
    if let Some(pid) = pid {
        if let Err(e) = kill_process_group(pid) {
            debug!("Failed to signal process group {pid}: {e}");
        }
    }

    child
        .kill()
        .await
        .map_err(|e| Error::ProcessTermination(e.to_string()))
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) -> std::io::Result<()> {
    let pgid = libc::pid_t::try_from(pgid)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    // Safety: killpg only sends a signal; the group was created by this process.
    let ret = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if ret == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[async_trait]
impl ScriptEngine for CommandEngine {
    async fn compile(&self, script: &Path) -> Result<()> {
        let command = self.command(&self.config.compile, script);
        debug!("Compiling: {}", command.to_shell_command());

        let (status, text) = run_to_completion(&command)
            .await
            .map_err(|e| Error::Compile(format!("Failed to execute {}: {e}", command.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Compile(failure_text(&command, status, text)))
        }
    }

    async fn execute(
        &self,
        script: &Path,
        on_start: StartCallback,
        on_line: Option<LineCallback>,
    ) -> Result<()> {
        // Compile errors must surface before any process exists.
        self.compile(script)
            .await
            .map_err(|e| Error::Runtime(e.to_string()))?;

        let command = self.command(&self.config.run, script);
        info!("Running: {}", command.to_shell_command());

        let mut cmd = command.to_tokio_command();
        cmd.stdin(Stdio::null()).kill_on_drop(true);
        // Own process group, so a kill also reaches whatever the script started.
        #[cfg(unix)]
        cmd.process_group(0);
        if on_line.is_some() {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Runtime(format!("Failed to execute {}: {e}", command.program)))?;

        let (handle, mut kill) = ProcessHandle::new(child.id());
        on_start(handle);

        let mut readers = Vec::new();
        if let Some(on_line) = &on_line {
            if let Some(stdout) = child.stdout.take() {
                readers.push(tokio::spawn(forward_lines(stdout, on_line.clone())));
            }
            if let Some(stderr) = child.stderr.take() {
                readers.push(tokio::spawn(forward_lines(stderr, on_line.clone())));
            }
        }

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = kill.requested() => None,
        };

        let outcome = match finished {
            Some(Ok(status)) => {
                debug!("Script process exited with {status}");
                Ok(())
            }
            Some(Err(e)) => Err(Error::Runtime(format!("Failed to wait for script: {e}"))),
            None => terminate(&mut child).await,
        };

        finish_readers(readers).await;
        outcome
    }

    fn execute_detached(&self, script: &Path) -> Result<()> {
        let command = self.command(&self.config.run, script);
        let pid = command
            .spawn_detached()
            .map_err(|e| Error::Launch(format!("Failed to launch {}: {e}", command.program)))?;
        info!("Launched {} as process {pid}", command.to_shell_command());
        Ok(())
    }

    async fn debug(&self, script: &Path) -> Result<()> {
        let command = self.command(&self.config.debug, script);
        debug!("Debugging: {}", command.to_shell_command());

        let (status, text) = run_to_completion(&command)
            .await
            .map_err(|e| Error::Debug(format!("Failed to execute {}: {e}", command.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Debug(failure_text(&command, status, text)))
        }
    }

    fn open_external_project(&self, script: &Path) -> Result<()> {
        let command = self.command(&self.config.open_external, script);
        command.spawn_detached().map_err(|e| {
            Error::ExternalTool(format!("Failed to launch {}: {e}", command.program))
        })?;
        info!("Opened external project: {}", command.to_shell_command());
        Ok(())
    }
}
