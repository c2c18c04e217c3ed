use anyhow::{Context, Result};
use script_runner_core::{CommandEngine, Config, Orchestrator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::host::{TerminalEditor, TerminalOutput};

/// Build an orchestrator for `script` using the config found next to it.
///
/// `configure` may adjust the discovered config before the session starts.
pub(crate) fn session_for(
    script: Option<&Path>,
    start_dir: &Path,
    configure: impl FnOnce(&mut Config),
) -> Result<Orchestrator> {
    let mut config = Config::discover(start_dir)
        .with_context(|| format!("Failed to load config for {}", start_dir.display()))?;
    configure(&mut config);
    debug!("Session config: {:?}", config);

    let engine = Arc::new(CommandEngine::new(config.engine.clone()));
    let editor = Arc::new(TerminalEditor::new(script.map(Path::to_path_buf)));
    let output = Arc::new(TerminalOutput::new());
    Ok(Orchestrator::new(config, engine, editor, output))
}

/// Open a session and load `script` into it.
///
/// Load failures have already been shown to the user, so they end the
/// process instead of being reported a second time.
pub(crate) fn load_session(
    script: &Path,
    configure: impl FnOnce(&mut Config),
) -> Result<Orchestrator> {
    let script = absolute(script)?;
    let start_dir = script.parent().unwrap_or(Path::new("."));
    let orchestrator = session_for(Some(&script), start_dir, configure)?;

    if orchestrator.load(&script).is_err() {
        std::process::exit(1);
    }
    Ok(orchestrator)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}
