use anyhow::{Context, Result};
use std::{env, path::Path};

use super::session::session_for;
use crate::display::render_tree;

pub fn new_command(name: &str, classless: bool, dir: Option<&Path>) -> Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let start_dir = dir.unwrap_or(&cwd);

    let orchestrator = session_for(None, start_dir, |config| {
        if let Some(dir) = dir {
            config.scripts_dir = Some(dir.to_path_buf());
        }
    })?;

    // Without the flag the config decides which template is used.
    let project = orchestrator
        .new_script(name, classless.then_some(true))
        .context("Failed to create script")?;

    println!("✨ Created {}", project.primary_script().display());
    print!("{}", render_tree(&project));
    Ok(())
}
