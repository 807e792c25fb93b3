//! Subcommand implementations.
//!
//! Every command writes to the given output so tests can capture it.

pub mod config;
pub mod decode;
pub mod encode;
pub mod send;

use maxxfan_core::Command;

use crate::cli::CommandArgs;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Builds the command from flags over the `[command]` table.
pub(crate) fn resolve_command(fields: &CommandArgs, config: &CliConfig) -> CliResult<Command> {
    Ok(fields.apply(config.command).build()?)
}
