pub mod build;
pub mod debug;
pub mod init;
pub mod load;
pub mod new;
pub mod open;
pub mod run;
mod session;

pub use build::build_command;
pub use debug::debug_command;
pub use init::init_command;
pub use load::load_command;
pub use new::new_command;
pub use open::open_command;
pub use run::run_command;
