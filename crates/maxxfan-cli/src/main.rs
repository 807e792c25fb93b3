//! maxxfan CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use maxxfan_cli::cli::{Cli, Command, ConfigAction};
use maxxfan_cli::commands;
use maxxfan_cli::commands::send::SendOptions;
use maxxfan_cli::config::CliConfig;
use maxxfan_cli::error::CliResult;
use maxxfan_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let mut stdout = io::stdout();

    match cli.command {
        Command::Encode {
            fields,
            protocol,
            json,
        } => commands::encode::run(&fields, protocol, json, &config, &mut stdout),
        Command::Decode {
            protocol,
            json,
            file,
        } => {
            let input = commands::decode::read_input(file.as_deref(), io::stdin())?;
            commands::decode::run(&input, protocol, json, &config, &mut stdout)
        }
        Command::Send {
            fields,
            protocol,
            repeat,
            gap_ms,
        } => {
            let options = SendOptions {
                protocol,
                repeat,
                gap_ms,
            };
            let cancel = commands::send::cancel_on_ctrl_c();
            commands::send::run(&fields, options, &config, cancel, stdout).await?;
            Ok(())
        }
        Command::Config { action } => {
            let path = cli.config.unwrap_or_else(CliConfig::default_path);
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &path, &mut stdout),
                ConfigAction::Validate => commands::config::validate(&config, &mut stdout),
                ConfigAction::Path => commands::config::path(&path, &mut stdout),
            }
        }
    }
}
