//! The `encode` command.

use std::io::Write;

use maxxfan_core::Command;
use maxxfan_protocol::{ProtocolKind, PulseTrain};
use serde::Serialize;
use tracing::debug;

use crate::cli::CommandArgs;
use crate::commands::resolve_command;
use crate::config::CliConfig;
use crate::error::CliResult;

/// JSON output of `encode --json`.
#[derive(Debug, Serialize)]
pub struct EncodeOutput {
    pub protocol: ProtocolKind,
    pub command: Command,
    pub pulses: PulseTrain,
    pub duration_us: u64,
}

/// Encodes the command and prints its pulse train.
pub fn run(
    fields: &CommandArgs,
    protocol: Option<ProtocolKind>,
    json: bool,
    config: &CliConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let command = resolve_command(fields, config)?;
    let protocol = protocol.unwrap_or_else(|| config.link.protocol.sending_protocol());
    let pulses = protocol.encode(&command);
    debug!(protocol = %protocol, pulses = pulses.len(), "Encoded command");

    if json {
        let output = EncodeOutput {
            protocol,
            command,
            duration_us: pulses.total_duration_us(),
            pulses,
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", pulses)?;
    }
    Ok(())
}
