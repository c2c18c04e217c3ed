use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Command templates used by [`crate::services::CommandEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    #[serde(default = "default_compile")]
    pub compile: CommandTemplate,
    #[serde(default = "default_run")]
    pub run: CommandTemplate,
    #[serde(default = "default_debug")]
    pub debug: CommandTemplate,
    #[serde(default = "default_open_external")]
    pub open_external: CommandTemplate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compile: default_compile(),
            run: default_run(),
            debug: default_debug(),
            open_external: default_open_external(),
        }
    }
}

/// A program plus argument list. Arguments may contain the placeholders
/// `{script}`, `{script_dir}` and `{script_name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommandTemplate {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl CommandTemplate {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            env: HashMap::new(),
        }
    }
}

fn default_compile() -> CommandTemplate {
    CommandTemplate::new("cscs", &["-check", "{script}"])
}

fn default_run() -> CommandTemplate {
    CommandTemplate::new("cscs", &["{script}"])
}

fn default_debug() -> CommandTemplate {
    CommandTemplate::new("cscs", &["-dbg", "{script}"])
}

fn default_open_external() -> CommandTemplate {
    CommandTemplate::new("cscs", &["-vs", "{script}"])
}
