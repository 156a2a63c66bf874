//! CLI argument definitions using clap
//!
//! Commands:
//! - hitstore init --config <path>
//! - hitstore start --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hitstore - a small self-hostable API hit-counter service
#[derive(Parser, Debug)]
#[command(name = "hitstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new hitstore data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./hitstore.json")]
        config: PathBuf,
    },

    /// Start the hitstore HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./hitstore.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
