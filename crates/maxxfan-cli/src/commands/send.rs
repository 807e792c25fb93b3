//! The `send` command.

use std::io::Write;
use std::time::Duration;

use maxxfan_link::{CancelHandle, RepeatSender, SendReport};
use maxxfan_protocol::ProtocolKind;
use tracing::{debug, info};

use crate::cli::CommandArgs;
use crate::commands::resolve_command;
use crate::config::CliConfig;
use crate::dryrun::DryRunTransmitter;
use crate::error::CliResult;

/// Command-line overrides of the `[link]` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    pub protocol: Option<ProtocolKind>,
    pub repeat: Option<u32>,
    pub gap_ms: Option<u64>,
}

/// Sends the command as a repeat burst to a dry-run transmitter writing to
/// `out`. Cancelling `cancel` stops the burst at the next repeat.
pub async fn run<W: Write + Send>(
    fields: &CommandArgs,
    options: SendOptions,
    config: &CliConfig,
    cancel: CancelHandle,
    out: W,
) -> CliResult<SendReport> {
    let command = resolve_command(fields, config)?;

    let mut link = config.link.clone();
    if let Some(protocol) = options.protocol {
        link = link.with_protocol(protocol);
    }
    if let Some(repeat) = options.repeat {
        link = link.with_repeat_count(repeat);
    }
    if let Some(gap_ms) = options.gap_ms {
        link = link.with_inter_frame_gap(Duration::from_millis(gap_ms));
    }

    let mut sender =
        RepeatSender::new(DryRunTransmitter::new(out), link)?.with_cancel_handle(cancel);
    debug!(protocol = %sender.protocol(), command = %command, "Dry-run send");

    let report = sender.send(&command).await?;

    let mut out = sender.into_transmitter().into_inner();
    if report.cancelled {
        writeln!(out, "cancelled after {}/{} frames", report.sent, report.requested)?;
    } else {
        writeln!(out, "sent {}/{} frames", report.sent, report.requested)?;
    }
    info!(sent = report.sent, requested = report.requested, "Send finished");
    Ok(report)
}

/// Returns a handle cancelled on Ctrl+C.
pub fn cancel_on_ctrl_c() -> CancelHandle {
    let cancel = CancelHandle::new();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            info!("Received Ctrl+C, cancelling burst");
            handle.cancel();
        }
    });
    cancel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn fields() -> CommandArgs {
        CommandArgs {
            fan_on: Some(true),
            speed: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn prints_each_frame_and_summary() {
        let mut out = Vec::new();
        let options = SendOptions {
            repeat: Some(3),
            ..Default::default()
        };
        let report = run(
            &fields(),
            options,
            &CliConfig::default(),
            CancelHandle::new(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(report.sent, 3);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("frame 1 (38800 us): [3200, -1600"));
        assert!(lines[2].starts_with("frame 3 "));
        assert_eq!(lines[3], "sent 3/3 frames");
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_burst_reports_partial() {
        let cancel = CancelHandle::new();
        cancel.cancel();
        let mut out = Vec::new();
        let report = run(
            &fields(),
            SendOptions::default(),
            &CliConfig::default(),
            cancel,
            &mut out,
        )
        .await
        .unwrap();

        assert!(report.cancelled);
        assert_eq!(String::from_utf8(out).unwrap(), "cancelled after 0/4 frames\n");
    }

    #[tokio::test]
    async fn zero_repeat_is_rejected() {
        let options = SendOptions {
            repeat: Some(0),
            ..Default::default()
        };
        let err = run(
            &fields(),
            options,
            &CliConfig::default(),
            CancelHandle::new(),
            Vec::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Link(_)));
    }
}
