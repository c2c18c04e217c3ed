//! Terminal front end for the script-runner session engine.

pub mod cli;
pub mod commands;
pub mod display;
pub mod host;
