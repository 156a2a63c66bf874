//! CLI module for hitstore
//!
//! Provides command-line interface for:
//! - init: Create the data directory layout
//! - start: Boot the store and serve HTTP

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, start, Config};
pub use errors::{CliError, CliResult};
