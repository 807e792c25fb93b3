//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use maxxfan_core::CommandBuilder;
use maxxfan_protocol::{ProtocolFilter, ProtocolKind};

/// maxxfan - Maxxfan remote-control frame encoder and decoder
#[derive(Debug, Parser)]
#[command(name = "maxxfan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MAXXFAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a command and print its pulse train
    Encode {
        #[command(flatten)]
        fields: CommandArgs,

        /// Protocol to encode with
        #[arg(long)]
        protocol: Option<ProtocolKind>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Decode a pulse train read from a file or stdin
    Decode {
        /// Protocol to decode with, or "any"
        #[arg(long)]
        protocol: Option<ProtocolFilter>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// File holding signed durations (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Send a command as a repeat burst to a dry-run transmitter
    Send {
        #[command(flatten)]
        fields: CommandArgs,

        /// Protocol to encode with
        #[arg(long)]
        protocol: Option<ProtocolKind>,

        /// Number of transmissions
        #[arg(long)]
        repeat: Option<u32>,

        /// Gap between transmissions in milliseconds
        #[arg(long)]
        gap_ms: Option<u64>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Command fields. Unset flags fall back to the `[command]` table.
#[derive(Debug, Clone, Default, Args)]
pub struct CommandArgs {
    /// Turn the fan on (or off with --fan-on=false)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub fan_on: Option<bool>,

    /// Fan speed in percent (10-100, steps of 10)
    #[arg(long)]
    pub speed: Option<u8>,

    /// Run in exhaust direction
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub exhaust: Option<bool>,

    /// Open the cover
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub cover_open: Option<bool>,

    /// Enable automatic mode
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub auto: Option<bool>,

    /// Automatic-mode temperature in °F (29-99)
    #[arg(long)]
    pub temperature: Option<u8>,

    /// Set the special flag
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub special: Option<bool>,

    /// Set the warn flag
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub warn: Option<bool>,
}

impl CommandArgs {
    /// Overrides the fields of `base` that were given on the command line.
    pub fn apply(&self, mut base: CommandBuilder) -> CommandBuilder {
        if let Some(on) = self.fan_on {
            base = base.fan_on(on);
        }
        if let Some(speed) = self.speed {
            base = base.fan_speed(speed);
        }
        if let Some(exhaust) = self.exhaust {
            base = base.fan_exhaust(exhaust);
        }
        if let Some(open) = self.cover_open {
            base = base.cover_open(open);
        }
        if let Some(auto) = self.auto {
            base = base.auto_mode(auto);
        }
        if let Some(temperature) = self.temperature {
            base = base.auto_temperature(temperature);
        }
        if let Some(special) = self.special {
            base = base.special(special);
        }
        if let Some(warn) = self.warn {
            base = base.warn(warn);
        }
        base
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use maxxfan_core::Command as FanCommand;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn encode_flags() {
        let cli = Cli::parse_from([
            "maxxfan",
            "encode",
            "--fan-on",
            "--speed",
            "30",
            "--auto=false",
            "--protocol",
            "maxxfan-serial",
            "--json",
        ]);
        let Command::Encode {
            fields,
            protocol,
            json,
        } = cli.command
        else {
            panic!("expected encode");
        };
        assert_eq!(fields.fan_on, Some(true));
        assert_eq!(fields.speed, Some(30));
        assert_eq!(fields.auto, Some(false));
        assert_eq!(fields.exhaust, None);
        assert_eq!(protocol, Some(ProtocolKind::MaxxfanSerial));
        assert!(json);
    }

    #[test]
    fn decode_accepts_any() {
        let cli = Cli::parse_from([
            "maxxfan",
            "--debug",
            "decode",
            "--protocol",
            "any",
            "frame.txt",
        ]);
        assert!(cli.debug);
        let Command::Decode { protocol, file, .. } = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(protocol, Some(ProtocolFilter::Any));
        assert_eq!(file, Some(PathBuf::from("frame.txt")));
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let result = Cli::try_parse_from(["maxxfan", "encode", "--protocol", "nec"]);
        assert!(result.is_err());
    }

    #[test]
    fn apply_overrides_only_given_fields() {
        let base = FanCommand::builder().fan_speed(70).warn(true);
        let args = CommandArgs {
            fan_on: Some(true),
            temperature: Some(65),
            ..Default::default()
        };
        let command = args.apply(base).build().unwrap();
        assert!(command.fan_on());
        assert_eq!(command.fan_speed(), 70);
        assert_eq!(command.auto_temperature(), 65);
        assert!(command.warn());
    }
}
