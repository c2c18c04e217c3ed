use script_runner_core::Project;

/// Render the project the way the project panel shows it: references
/// first, then the source files.
pub fn render_tree(project: &Project) -> String {
    let items = project.items();
    let (assemblies, sources): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.is_assembly);

    let mut out = format!("📜 Script '{}'\n", project.name());
    out.push_str("├── References\n");
    for (i, item) in assemblies.iter().enumerate() {
        let branch = if i + 1 == assemblies.len() { "└──" } else { "├──" };
        out.push_str(&format!("│   {branch} {}\n", item.display_name));
    }
    for (i, item) in sources.iter().enumerate() {
        let branch = if i + 1 == sources.len() { "└──" } else { "├──" };
        let marker = if item.is_primary { " (primary)" } else { "" };
        out.push_str(&format!("{branch} {}{marker}\n", item.display_name));
    }
    out
}
