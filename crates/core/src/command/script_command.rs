use std::path::Path;
use std::process::Stdio;
use tracing::{debug, warn};

use crate::config::CommandTemplate;
use crate::types::project::script_name;

/// A fully expanded engine invocation for one script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub env: Vec<(String, String)>,
}

impl ScriptCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// Expand `{script}`, `{script_dir}` and `{script_name}` in `template`.
    /// The command runs from the script's directory.
    pub fn from_template(template: &CommandTemplate, script: &Path) -> Self {
        let script_path = script.to_string_lossy();
        let script_dir = script
            .parent()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = script_name(script);

        let args = template
            .args
            .iter()
            .map(|arg| {
                arg.replace("{script}", &script_path)
                    .replace("{script_dir}", &script_dir)
                    .replace("{script_name}", &name)
            })
            .collect();

        let mut env: Vec<(String, String)> = template
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        env.sort();

        let mut command = Self::new(template.program.clone(), args);
        command.env = env;
        if !script_dir.is_empty() {
            command.working_dir = Some(script_dir);
        }
        command
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    /// Build the async process command. Standard streams are left to the caller.
    pub fn to_tokio_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Spawn without waiting; the child outlives this call and is reaped by a
    /// background task once it exits. Must be called inside a tokio runtime.
    pub fn spawn_detached(&self) -> std::io::Result<u32> {
        let mut cmd = self.to_tokio_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        let mut child = cmd.spawn()?;
        let pid = child.id().unwrap_or_default();

        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("Detached {program} ({pid}) exited with {status}"),
                Err(e) => warn!("Failed to reap detached {program} ({pid}): {e}"),
            }
        });
        Ok(pid)
    }
}
