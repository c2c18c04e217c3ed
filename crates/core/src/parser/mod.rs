//! Script source scanning

pub mod directives;

// Re-export commonly used items
pub use directives::{Directive, parse_directives};
