mod script_command;

pub use script_command::ScriptCommand;
