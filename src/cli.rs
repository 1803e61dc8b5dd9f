//! Command line interface for the curio binary.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Command, CurioArgs, OutputFormat};
pub use commands::execute_command;
