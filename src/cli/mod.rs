//! Command-line interface for boltrun.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, ConfigArgs, EndpointArgs, InitArgs, ListArgs, RunArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, ProjectContext};
