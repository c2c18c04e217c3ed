//! Project resolution and scaffolding

pub mod model;
pub mod new_script;

pub use model::ProjectModel;
pub use new_script::{NewScript, normalize_script_name};
