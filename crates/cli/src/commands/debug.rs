use anyhow::Result;
use std::path::Path;

use super::session::load_session;

pub async fn debug_command(script: &Path) -> Result<()> {
    let orchestrator = load_session(script, |_| {})?;

    if orchestrator.debug()?.join().await.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
