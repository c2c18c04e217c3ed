//! Dependency directives embedded in script comments (`//css_inc`, `//css_ref`, ...)

use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//css_(?P<name>[A-Za-z]+)(?:\s+(?P<arg>.*))?$")
        .expect("directive pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Include(String),
    Reference(String),
    SearchDir(String),
}

impl Directive {
    fn from_parts(name: &str, arg: String) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "include" | "inc" | "import" => Some(Directive::Include(arg)),
            "reference" | "ref" | "r" => Some(Directive::Reference(arg)),
            "searchdir" | "dir" => Some(Directive::SearchDir(arg)),
            _ => None,
        }
    }
}

/// Extract every recognised directive from `source`, in line order.
pub fn parse_directives(source: &str) -> Vec<Directive> {
    source
        .lines()
        .filter_map(|line| {
            let caps = DIRECTIVE.captures(line)?;
            let arg = clean_argument(caps.name("arg")?.as_str());
            if arg.is_empty() {
                tracing::trace!("Ignoring directive without argument: {}", line.trim());
                return None;
            }
            Directive::from_parts(&caps["name"], arg)
        })
        .collect()
}

fn clean_argument(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    let trimmed = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_aliases() {
        let source = r#"//css_include utils.cs;
//css_inc "my helpers.cs"
//css_import legacy
//css_reference System.Data.dll;
//css_ref lib/Newtonsoft.Json.dll
//css_r System.Xml
//css_dir ../shared
//css_searchdir  libs ;
using System;
"#;
        assert_eq!(
            parse_directives(source),
            vec![
                Directive::Include("utils.cs".into()),
                Directive::Include("my helpers.cs".into()),
                Directive::Include("legacy".into()),
                Directive::Reference("System.Data.dll".into()),
                Directive::Reference("lib/Newtonsoft.Json.dll".into()),
                Directive::Reference("System.Xml".into()),
                Directive::SearchDir("../shared".into()),
                Directive::SearchDir("libs".into()),
            ]
        );
    }

    #[test]
    fn test_ignores_unknown_and_empty_directives() {
        let source = "//css_args /ac\n//css_inc\n// css_inc spaced.cs\nclass Script {}\n";
        assert!(parse_directives(source).is_empty());
    }

    #[test]
    fn test_allows_indentation() {
        let source = "    //css_ref  Foo.dll;\r\n";
        assert_eq!(
            parse_directives(source),
            vec![Directive::Reference("Foo.dll".into())]
        );
    }
}
