//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod sample;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
