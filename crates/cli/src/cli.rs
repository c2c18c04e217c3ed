use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    build_command, debug_command, init_command, load_command, new_command, open_command,
    run_command,
};

#[derive(Parser, Debug)]
#[command(name = "script-runner")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a script and show its project tree
    #[command(visible_alias = "l")]
    Load {
        /// Path to the primary script file
        script: PathBuf,

        /// Print the resolved project as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a script without running it
    #[command(visible_alias = "b")]
    Build { script: PathBuf },
    /// Run a script; Ctrl-C stops it
    #[command(visible_alias = "r")]
    Run {
        script: PathBuf,

        /// Launch in a detached process instead of tracking it
        #[arg(short, long)]
        external: bool,

        /// Do not forward the script's output to the console channel
        #[arg(long)]
        no_intercept: bool,
    },
    /// Run a script under the configured debugger
    Debug { script: PathBuf },
    /// Open a script in the configured external IDE
    Open { script: PathBuf },
    /// Create a new script from a template
    New {
        /// Script name; invalid file name characters are dropped
        name: String,

        /// Use the class-less template
        #[arg(long)]
        classless: bool,

        /// Directory to create the script in
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init {
        /// Specify the current working directory
        #[arg(short, long)]
        cwd: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn execute(self) -> Result<()> {
        match self {
            Commands::Load { script, json } => load_command(&script, json),
            Commands::Build { script } => build_command(&script).await,
            Commands::Run {
                script,
                external,
                no_intercept,
            } => run_command(&script, external, no_intercept).await,
            Commands::Debug { script } => debug_command(&script).await,
            Commands::Open { script } => open_command(&script),
            Commands::New {
                name,
                classless,
                dir,
            } => new_command(&name, classless, dir.as_deref()),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
