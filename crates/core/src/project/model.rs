use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::{Error, Result},
    parser::{Directive, parse_directives},
    types::Project,
};

/// Resolves an entry script into its [`Project`] by following the
/// `//css_*` directives of every reachable source file.
///
/// Resolution always reads from disk; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ProjectModel {
    extension: String,
    search_dirs: Vec<PathBuf>,
}

impl Default for ProjectModel {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Default)]
struct Walk {
    seen: HashSet<PathBuf>,
    sources: Vec<PathBuf>,
    assemblies: Vec<PathBuf>,
}

impl ProjectModel {
    pub fn new(extension: impl Into<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            extension: extension.into(),
            search_dirs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.script_extension.clone(), config.search_dirs.clone())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_script(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Fails with [`Error::InvalidScript`] when `entry` is missing, has the
    /// wrong extension, or declares an include that cannot be found.
    pub fn resolve(&self, entry: &Path) -> Result<Project> {
        if entry.as_os_str().is_empty() || !entry.is_file() {
            return Err(Error::invalid_script(entry, "script does not exist"));
        }
        if !self.is_script(entry) {
            let ext = entry
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            return Err(Error::invalid_script(
                entry,
                format!("the file type '{ext}' is not supported"),
            ));
        }

        let primary = entry
            .canonicalize()
            .map_err(|e| Error::invalid_script(entry, e.to_string()))?;

        let mut walk = Walk::default();
        self.visit(&primary, &mut walk)?;

        tracing::debug!(
            "Resolved {} into {} source file(s) and {} assembly reference(s)",
            primary.display(),
            walk.sources.len(),
            walk.assemblies.len()
        );

        Ok(Project::new(primary, walk.sources, walk.assemblies))
    }

    fn visit(&self, file: &Path, walk: &mut Walk) -> Result<()> {
        if !walk.seen.insert(file.to_path_buf()) {
            return Ok(());
        }
        walk.sources.push(file.to_path_buf());

        let source = std::fs::read_to_string(file)
            .map_err(|e| Error::invalid_script(file, format!("cannot read file: {e}")))?;
        let base = file.parent().unwrap_or_else(|| Path::new("."));
        let directives = parse_directives(&source);

        // Search dirs apply to the whole file regardless of where they appear.
        let local_dirs: Vec<PathBuf> = directives
            .iter()
            .filter_map(|d| match d {
                Directive::SearchDir(dir) => Some(base.join(dir)),
                _ => None,
            })
            .collect();

        for directive in directives {
            match directive {
                Directive::Include(name) => {
                    let path = self.locate(&name, base, &local_dirs, true).ok_or_else(|| {
                        Error::invalid_script(file, format!("cannot find included file '{name}'"))
                    })?;
                    self.visit(&path, walk)?;
                }
                Directive::Reference(name) => {
                    let path = self
                        .locate(&name, base, &local_dirs, false)
                        .unwrap_or_else(|| PathBuf::from(&name));
                    if !walk.assemblies.contains(&path) {
                        walk.assemblies.push(path);
                    }
                }
                Directive::SearchDir(_) => {}
            }
        }

        Ok(())
    }

    fn locate(
        &self,
        name: &str,
        base: &Path,
        local_dirs: &[PathBuf],
        complete_extension: bool,
    ) -> Option<PathBuf> {
        let requested = Path::new(name);
        let mut candidates = vec![requested.to_path_buf()];
        if complete_extension && requested.extension().is_none() {
            candidates.push(requested.with_extension(&self.extension));
        }

        for candidate in &candidates {
            if candidate.is_absolute() {
                if candidate.is_file() {
                    return candidate.canonicalize().ok();
                }
                continue;
            }

            let dirs = std::iter::once(base)
                .chain(local_dirs.iter().map(PathBuf::as_path))
                .chain(self.search_dirs.iter().map(PathBuf::as_path));
            for dir in dirs {
                let path = dir.join(candidate);
                if path.is_file() {
                    return path.canonicalize().ok();
                }
            }
        }

        None
    }
}
