use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::EngineConfig;

pub const CONFIG_FILE_NAMES: [&str; 2] = [".script-runner.json", "script-runner.json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Extension (without the dot) that marks a file as a loadable script.
    #[serde(default = "default_extension")]
    pub script_extension: String,

    /// Extra directories probed when resolving includes and references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_dirs: Vec<PathBuf>,

    /// Forward every line the running script prints to the console channel.
    #[serde(default = "default_true")]
    pub intercept_console: bool,

    #[serde(default)]
    pub classless_by_default: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_extension() -> String {
    "cs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_extension: default_extension(),
            search_dirs: Vec::new(),
            intercept_console: true,
            classless_by_default: false,
            scripts_dir: None,
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `start_dir`, or the defaults.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match Self::find_config_file(start_dir) {
            Some(path) => {
                tracing::debug!("Using config file: {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                tracing::trace!("No config file above {}", start_dir.display());
                Ok(Self::default())
            }
        }
    }

    /// Directory new scripts are created in.
    pub fn scripts_dir(&self) -> PathBuf {
        if let Some(dir) = &self.scripts_dir {
            return dir.clone();
        }
        match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            Some(home) => PathBuf::from(home).join("Documents").join("C# Scripts"),
            None => PathBuf::from("scripts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandTemplate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            search_dirs: vec![PathBuf::from("/opt/lib")],
            intercept_console: false,
            engine: EngineConfig {
                run: CommandTemplate::new("dotnet", &["script", "{script}"]),
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.engine.run.program, "dotnet");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.script_extension, "cs");
        assert!(parsed.intercept_console);
        assert!(!parsed.classless_by_default);
        assert_eq!(parsed.engine, EngineConfig::default());
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join(".script-runner.json"),
            r#"{ "script_extension": "csx" }"#,
        )
        .unwrap();

        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(".script-runner.json"));

        let config = Config::discover(&nested).unwrap();
        assert_eq!(config.script_extension, "csx");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("script-runner.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
