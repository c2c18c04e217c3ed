use serde::Serialize;
use std::path::{Path, PathBuf};

/// The resolved file set of one entry script.
///
/// Produced by [`crate::project::ProjectModel`] and never mutated afterwards;
/// a reload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    primary_script: PathBuf,
    source_files: Vec<PathBuf>,
    assemblies: Vec<PathBuf>,
}

impl Project {
    /// `source_files` must start with `primary_script`.
    pub(crate) fn new(
        primary_script: PathBuf,
        source_files: Vec<PathBuf>,
        assemblies: Vec<PathBuf>,
    ) -> Self {
        debug_assert_eq!(source_files.first(), Some(&primary_script));
        Self {
            primary_script,
            source_files,
            assemblies,
        }
    }

    pub fn primary_script(&self) -> &Path {
        &self.primary_script
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    pub fn assemblies(&self) -> &[PathBuf] {
        &self.assemblies
    }

    /// Script name without extension, as shown in build markers.
    pub fn name(&self) -> String {
        script_name(&self.primary_script)
    }

    /// Assemblies first, then source files.
    pub fn items(&self) -> Vec<ProjectItem> {
        self.assemblies
            .iter()
            .map(|path| ProjectItem::assembly(path.clone()))
            .chain(
                self.source_files
                    .iter()
                    .map(|path| ProjectItem::source(path.clone(), *path == self.primary_script)),
            )
            .collect()
    }

    /// Case-insensitive lookup of the item for `path`.
    pub fn find_item(&self, path: &Path) -> Option<ProjectItem> {
        let wanted = path.to_string_lossy().to_lowercase();
        self.items()
            .into_iter()
            .find(|item| item.path.to_string_lossy().to_lowercase() == wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectItem {
    pub path: PathBuf,
    pub is_primary: bool,
    pub is_assembly: bool,
    pub display_name: String,
}

impl ProjectItem {
    fn source(path: PathBuf, is_primary: bool) -> Self {
        let display_name = display_name(&path);
        Self {
            path,
            is_primary,
            is_assembly: false,
            display_name,
        }
    }

    fn assembly(path: PathBuf) -> Self {
        let display_name = display_name(&path);
        Self {
            path,
            is_primary: false,
            is_assembly: true,
            display_name,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub(crate) fn script_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project::new(
            PathBuf::from("/scripts/hello.cs"),
            vec![
                PathBuf::from("/scripts/hello.cs"),
                PathBuf::from("/scripts/Utils.cs"),
            ],
            vec![PathBuf::from("System.Data.dll")],
        )
    }

    #[test]
    fn test_items_order_and_flags() {
        let items = sample().items();
        assert_eq!(items.len(), 3);

        assert!(items[0].is_assembly);
        assert_eq!(items[0].display_name, "System.Data.dll");

        assert!(items[1].is_primary);
        assert_eq!(items[1].display_name, "hello.cs");

        assert!(!items[2].is_primary);
        assert!(!items[2].is_assembly);
    }

    #[test]
    fn test_find_item_is_case_insensitive() {
        let project = sample();
        let item = project.find_item(Path::new("/SCRIPTS/utils.CS")).unwrap();
        assert_eq!(item.path, PathBuf::from("/scripts/Utils.cs"));
        assert!(project.find_item(Path::new("/scripts/other.cs")).is_none());
    }

    #[test]
    fn test_name_strips_extension() {
        assert_eq!(sample().name(), "hello");
    }
}
