use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SCRIPT_NAME: &str = "New Script";

/// Upper bound on `name1`, `name2`, ... probing before giving up.
const MAX_NAME_ATTEMPTS: usize = 100;

pub const CLASSIC_TEMPLATE: &str = r#"using System;
using System.Diagnostics;

class Script
{
    [STAThread]
    static public void Main(string[] args)
    {
        Console.WriteLine("Hello World!");
    }
}
"#;

pub const CLASSLESS_TEMPLATE: &str = r#"//css_args /ac
using System;

void main(string[] args)
{
    Console.WriteLine("Hello World!");
}
"#;

/// Scaffolds a new script file from one of the built-in templates.
#[derive(Debug, Clone)]
pub struct NewScript {
    dir: PathBuf,
    extension: String,
    classless: bool,
}

impl NewScript {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            classless: false,
        }
    }

    pub fn classless(mut self, classless: bool) -> Self {
        self.classless = classless;
        self
    }

    pub fn template(&self) -> &'static str {
        if self.classless {
            CLASSLESS_TEMPLATE
        } else {
            CLASSIC_TEMPLATE
        }
    }

    /// Write the template under a free file name derived from `name` and
    /// return the new path. The directory is created when missing.
    pub fn create(&self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let stem = normalize_script_name(name);
        let path = self.free_path(&stem)?;
        std::fs::write(&path, self.template())?;

        tracing::info!("Created new script {}", path.display());
        Ok(path)
    }

    fn free_path(&self, stem: &str) -> Result<PathBuf> {
        let first = self.dir.join(format!("{stem}.{}", self.extension));
        if !first.exists() {
            return Ok(first);
        }

        (1..=MAX_NAME_ATTEMPTS)
            .map(|index| self.dir.join(format!("{stem}{index}.{}", self.extension)))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| {
                Error::invalid_script(
                    self.dir.join(stem),
                    "too many script files with a similar name already exist",
                )
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Strip characters that are not allowed in file names (and `_`).
pub fn normalize_script_name(name: &str) -> String {
    const INVALID: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '_'];

    let normalized: String = name
        .chars()
        .filter(|c| !c.is_control() && !INVALID.contains(c))
        .collect();
    let normalized = normalized.trim();

    if normalized.is_empty() {
        DEFAULT_SCRIPT_NAME.to_string()
    } else {
        normalized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_script_name() {
        assert_eq!(normalize_script_name("my_script?"), "myscript");
        assert_eq!(normalize_script_name("a/b\\c"), "abc");
        assert_eq!(normalize_script_name("  "), DEFAULT_SCRIPT_NAME);
        assert_eq!(normalize_script_name("Report 2024"), "Report 2024");
    }

    #[test]
    fn test_create_picks_free_name() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("C# Scripts");
        let scaffold = NewScript::new(&dir, "cs");

        let first = scaffold.create("hello").unwrap();
        let second = scaffold.create("hello").unwrap();
        let third = scaffold.create("hello").unwrap();

        assert_eq!(first, dir.join("hello.cs"));
        assert_eq!(second, dir.join("hello1.cs"));
        assert_eq!(third, dir.join("hello2.cs"));
        assert_eq!(fs::read_to_string(first).unwrap(), CLASSIC_TEMPLATE);
    }

    #[test]
    fn test_classless_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = NewScript::new(temp_dir.path(), "cs")
            .classless(true)
            .create("")
            .unwrap();

        assert_eq!(path, temp_dir.path().join("New Script.cs"));
        assert!(fs::read_to_string(path).unwrap().starts_with("//css_args /ac"));
    }
}
