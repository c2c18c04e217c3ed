mod channel;
pub(crate) mod project;
mod status;

// Re-export commonly used types
pub use channel::OutputChannel;
pub use project::{Project, ProjectItem};
pub use status::{Controls, SessionStatus};
