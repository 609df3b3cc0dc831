use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pt_cli::commands::shell::Shell;
use pt_cli::commands::{calendar, customers, export, stats, trainings, util};
use pt_cli::{Cli, Commands, Config};
use pt_core::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let state = AppState::seeded().context("failed to load sample data")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Customers(args)) => {
            let query = customers::query_from_args(&args.search, args.sort, args.desc);
            customers::run(&mut out, state.customers().all(), &query, cli.json)?;
        }
        Some(Commands::Trainings(args)) => {
            let query = trainings::query_from_args(&args.search, args.sort, args.desc);
            trainings::run(
                &mut out,
                state.trainings().all(),
                state.customers().all(),
                &query,
                &config.date_format,
                cli.json,
            )?;
        }
        Some(Commands::Stats) => {
            stats::run(&mut out, state.trainings().all(), cli.json)?;
        }
        Some(Commands::Calendar(args)) => {
            let anchor = util::parse_date(args.date.as_deref())?;
            calendar::run(
                &mut out,
                state.trainings().all(),
                state.customers().all(),
                args.view,
                anchor,
                cli.json,
            )?;
        }
        Some(Commands::Export(args)) => {
            let path = args.output.unwrap_or_else(|| config.export_path.clone());
            export::run(&mut out, state.customers().all(), &path)?;
        }
        Some(Commands::Activities) => {
            trainings::run_activities(&mut out, cli.json)?;
        }
        Some(Commands::Shell) => {
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            Shell::new(stdin.lock(), &mut out, state, config)
                .json(cli.json)
                .interactive(interactive)
                .run()?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
