//! Default implementations of the collaborator interfaces

pub mod buffered_output;
pub mod command_engine;

pub use buffered_output::BufferedOutput;
pub use command_engine::CommandEngine;
