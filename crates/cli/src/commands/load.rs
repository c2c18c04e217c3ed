use anyhow::Result;
use std::path::Path;

use super::session::load_session;
use crate::display::render_tree;

pub fn load_command(script: &Path, json: bool) -> Result<()> {
    let orchestrator = load_session(script, |_| {})?;
    let Some(project) = orchestrator.project() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        print!("{}", render_tree(&project));
    }
    Ok(())
}
