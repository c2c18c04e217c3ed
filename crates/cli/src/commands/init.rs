use anyhow::{Context, Result};
use script_runner_core::Config;
use script_runner_core::config::CONFIG_FILE_NAMES;
use std::{env, path::Path};
use tracing::info;

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote default config to {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Edit the 'engine' section to point at your script engine.");
    println!("   Placeholders: {{script}}, {{script_dir}}, {{script_name}}");
    Ok(())
}
