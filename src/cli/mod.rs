pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedbricks")]
#[command(about = "Aggregate social feeds into one ranked list", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/feedbricks/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers for fetching networks
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all configured networks and print the aggregated list
    Fetch {
        /// Print JSON instead of the display template
        #[arg(long)]
        json: bool,

        /// Seed for the randomized selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the request URL built for each configured network
    Urls,
    /// List the supported networks
    Networks,
    /// Write a default config file if none exists
    Init,
}
