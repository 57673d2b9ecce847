//! CloudSync CLI
//!
//! Usage: cloudsync [COMMAND]
//!
//! Commands:
//!   start     Run the sync engine (timer or realtime) until Ctrl+C
//!   sync-now  Sync the configured folder once
//!   config    Show or edit the configuration
//!
//! Without a command, an interactive menu opens.

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use cloudsync::TomlConfigStore;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = TomlConfigStore::new()?;

    match cli.command {
        Some(Commands::Start) => {
            let interrupts = commands::Interrupts::install()?;
            commands::start::cmd_start(&store, &interrupts, cli.json)?;
        }
        Some(Commands::SyncNow) => {
            if !commands::sync_now::cmd_sync_now(&store, cli.json)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Config { action }) => {
            commands::config::cmd_config(&store, action, cli.json)?;
        }
        None => {
            if cli.json || !std::io::stdin().is_terminal() {
                Cli::command().print_help()?;
                println!();
            } else {
                let interrupts = commands::Interrupts::install()?;
                commands::interactive::run_menu(&store, &interrupts)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,cloudsync={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
