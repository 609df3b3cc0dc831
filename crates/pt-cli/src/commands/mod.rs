//! CLI subcommand implementations.

pub mod calendar;
pub mod customers;
pub mod export;
pub mod shell;
pub mod stats;
pub mod trainings;
pub mod util;
