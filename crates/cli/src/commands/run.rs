use anyhow::Result;
use script_runner_core::{SessionEvent, SessionStatus, StopOutcome};
use std::path::Path;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use super::session::load_session;

pub async fn run_command(script: &Path, external: bool, no_intercept: bool) -> Result<()> {
    let orchestrator = load_session(script, |config| {
        if no_intercept {
            config.intercept_console = false;
        }
    })?;

    let mut events = orchestrator.subscribe();
    let Some(task) = orchestrator.run(external)? else {
        println!("🚀 Launched {} in a detached process", script.display());
        return Ok(());
    };

    let watcher = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::StatusChanged(SessionStatus::Running)) => {
                        if let Some(pid) = orchestrator.running_process().and_then(|p| p.pid()) {
                            debug!("Script process started with pid {pid}");
                        }
                    }
                    Ok(event) => debug!("Session event: {:?}", event),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    let mut task = std::pin::pin!(task.join());
    let result = loop {
        tokio::select! {
            result = &mut task => break result,
            _ = tokio::signal::ctrl_c() => match orchestrator.stop() {
                StopOutcome::Requested => info!("Stop requested"),
                StopOutcome::NotRunning => debug!("Nothing to stop yet"),
                StopOutcome::Failed(reason) => eprintln!("⚠️  Failed to stop script: {reason}"),
            },
        }
    };
    watcher.abort();

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
