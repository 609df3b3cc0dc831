//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pt_core::{CalendarView, CustomerField, TrainingField};

/// Personal trainer customers and training sessions.
///
/// Lists, searches and sorts customers and sessions, shows minutes per
/// activity and a session calendar, and exports customers to CSV. Data is
/// seeded with sample records on every start; use `pt shell` to make changes
/// that last for the session.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List customers.
    Customers(CustomerListArgs),

    /// List training sessions.
    Trainings(TrainingListArgs),

    /// Show total minutes per activity.
    Stats,

    /// Show training sessions on a calendar.
    Calendar(CalendarArgs),

    /// Export customers to a CSV file.
    Export(ExportArgs),

    /// List the suggested activities.
    Activities,

    /// Start an interactive session reading commands from stdin.
    Shell,
}

#[derive(Debug, Clone, Args)]
pub struct CustomerListArgs {
    /// Only show customers whose name or email contains this text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Column to sort by (firstName, lastName, email, phone, address, city).
    #[arg(long, default_value = "lastName")]
    pub sort: CustomerField,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TrainingListArgs {
    /// Only show sessions whose customer or activity contains this text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Column to sort by (date, activity, duration, customer).
    #[arg(long, default_value = "date")]
    pub sort: TrainingField,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CalendarArgs {
    /// Calendar view (month, week, day).
    #[arg(long, default_value = "month")]
    pub view: CalendarView,

    /// Any date inside the period to show (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// File to write. Defaults to the configured export path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
