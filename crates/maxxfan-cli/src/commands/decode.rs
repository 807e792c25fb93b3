//! The `decode` command.

use std::io::{Read, Write};
use std::path::Path;

use maxxfan_core::Command;
use maxxfan_protocol::{ProtocolFilter, ProtocolKind, PulseTrain};
use serde::Serialize;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::CliResult;

/// JSON output of `decode --json`.
#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub protocol: ProtocolKind,
    pub command: Command,
}

/// Reads the pulse list from `file`, or from `stdin` when `None`.
pub fn read_input(file: Option<&Path>, stdin: impl Read) -> CliResult<String> {
    let mut text = String::new();
    match file {
        Some(path) => text = std::fs::read_to_string(path)?,
        None => {
            let mut stdin = stdin;
            stdin.read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

/// Decodes `input` and prints the command dump.
pub fn run(
    input: &str,
    protocol: Option<ProtocolFilter>,
    json: bool,
    config: &CliConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let train: PulseTrain = input.parse()?;
    let filter = protocol.unwrap_or(config.link.protocol);
    debug!(filter = %filter, pulses = train.len(), "Decoding");

    let (protocol, command) = filter.decode(train.pulses())?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &DecodeOutput { protocol, command })?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", command)?;
    }
    Ok(())
}
