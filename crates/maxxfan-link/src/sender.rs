//! Repeat-burst transmission.
//!
//! The link is unidirectional and unacknowledged, so every command is sent
//! as a burst of identical frames. The frame is encoded once; the burst then
//! yields to the runtime between repeats and checks for cancellation at each
//! repeat boundary, never in the middle of a frame.

use maxxfan_core::{Command, CommandTemplate};
use maxxfan_protocol::{ProtocolKind, PulseTrain};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cancel::CancelHandle;
use crate::config::LinkConfig;
use crate::error::LinkResult;
use crate::transport::Transmitter;

/// Outcome of one burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendReport {
    /// Frames actually transmitted.
    pub sent: u32,
    /// Frames the burst was configured for.
    pub requested: u32,
    /// Whether the burst stopped early on cancellation.
    pub cancelled: bool,
}

impl SendReport {
    /// Returns true if every requested frame went out.
    pub fn is_complete(&self) -> bool {
        self.sent == self.requested
    }
}

/// Sends commands as repeat bursts through a [`Transmitter`].
pub struct RepeatSender<T> {
    transmitter: T,
    config: LinkConfig,
    cancel: CancelHandle,
}

impl<T: Transmitter> RepeatSender<T> {
    /// Creates a sender.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Config`](crate::LinkError::Config) if `config`
    /// does not validate.
    pub fn new(transmitter: T, config: LinkConfig) -> LinkResult<Self> {
        config.validate()?;
        Ok(Self {
            transmitter,
            config,
            cancel: CancelHandle::new(),
        })
    }

    /// Builder: share an existing cancellation handle.
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that cancels bursts of this sender.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// The protocol frames are encoded with.
    pub fn protocol(&self) -> ProtocolKind {
        self.config.protocol.sending_protocol()
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn into_transmitter(self) -> T {
        self.transmitter
    }

    /// Encodes `command` once and transmits it `repeat_count` times.
    ///
    /// # Errors
    ///
    /// A transmitter error aborts the burst and is returned as is.
    pub async fn send(&mut self, command: &Command) -> LinkResult<SendReport> {
        let protocol = self.protocol();
        let train = protocol.encode(command);
        debug!(protocol = %protocol, command = %command, "Encoded command");
        self.burst(protocol, &train).await
    }

    /// Resolves every deferred field of `template` once, then sends the
    /// resulting command.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Command`](crate::LinkError::Command) if the
    /// template resolves to an invalid command, otherwise as [`Self::send`].
    pub async fn send_template(&mut self, template: &CommandTemplate) -> LinkResult<SendReport> {
        let command = template.resolve()?;
        self.send(&command).await
    }

    async fn burst(&mut self, protocol: ProtocolKind, train: &PulseTrain) -> LinkResult<SendReport> {
        let requested = self.config.repeat_count;
        let gap = self.config.inter_frame_gap();
        let mut report = SendReport {
            sent: 0,
            requested,
            cancelled: false,
        };

        info!(
            protocol = %protocol,
            repeats = requested,
            gap_ms = self.config.inter_frame_gap_ms,
            frame_us = train.total_duration_us(),
            "Sending burst"
        );

        for repeat in 0..requested {
            if repeat > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(gap) => {}
                    _ = self.cancel.cancelled() => {}
                }
            }

            if self.cancel.is_cancelled() {
                report.cancelled = true;
                info!(sent = report.sent, requested, "Burst cancelled");
                return Ok(report);
            }

            if let Err(e) = self.transmitter.transmit(train).await {
                warn!(error = %e, sent = report.sent, requested, "Transmit failed, aborting burst");
                return Err(e);
            }
            report.sent += 1;
        }

        debug!(sent = report.sent, "Burst complete");
        Ok(report)
    }
}
