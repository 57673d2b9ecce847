//! CLI Argument Parsing
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - Running without a subcommand opens the interactive menu

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cloudsync::SyncMode;

/// CloudSync - timer and realtime folder sync on top of rclone
#[derive(Parser, Debug)]
#[command(name = "cloudsync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'cloudsync' without arguments for the interactive menu.")]
pub struct Cli {
    /// Output events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the sync engine (timer or realtime, per config) until Ctrl+C
    Start,

    /// Sync the configured folder once
    SyncNow,

    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Update one or more settings
    Set {
        /// Folder to sync
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Rclone remote name
        #[arg(long)]
        remote: Option<String>,

        /// Remote subfolder (empty = folder name)
        #[arg(long)]
        subpath: Option<String>,

        /// Sync mode
        #[arg(long, value_parser = parse_mode)]
        mode: Option<SyncMode>,

        /// Minutes between syncs in timer mode
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

fn parse_mode(value: &str) -> Result<SyncMode, String> {
    value.parse()
}
