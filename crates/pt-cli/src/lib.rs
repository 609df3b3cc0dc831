//! Personal trainer CLI library.
//!
//! This crate provides the command-line interface and interactive shell
//! over the `pt-core` stores.

mod cli;
pub mod commands;
mod config;
mod prompt;

pub use cli::{CalendarArgs, Cli, Commands, CustomerListArgs, ExportArgs, TrainingListArgs};
pub use config::Config;
pub use prompt::Prompt;
