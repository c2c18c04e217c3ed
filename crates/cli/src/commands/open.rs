use anyhow::{Context, Result};
use std::path::Path;

use super::session::load_session;

pub fn open_command(script: &Path) -> Result<()> {
    let orchestrator = load_session(script, |_| {})?;
    orchestrator
        .open_external()
        .context("Failed to open the script in the external IDE")?;
    println!("🛠️  Opened {} externally", script.display());
    Ok(())
}
