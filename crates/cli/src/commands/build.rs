use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::session::load_session;

pub async fn build_command(script: &Path) -> Result<()> {
    let orchestrator = load_session(script, |_| {})?;

    // The build transcript is already on stdout; only the exit code is left.
    if let Err(e) = orchestrator.build()?.join().await {
        debug!("Build failed: {e}");
        std::process::exit(1);
    }
    Ok(())
}
