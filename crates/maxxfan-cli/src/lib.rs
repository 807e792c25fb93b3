//! Command-line encoder, decoder and dry-run sender
//!
//! This crate provides the `maxxfan` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dryrun;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, CliResult};
