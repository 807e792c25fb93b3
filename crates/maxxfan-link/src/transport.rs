//! The seam to the radio or infrared hardware.
//!
//! The link never touches hardware itself. A host supplies a [`Transmitter`]
//! that emits one pulse train per call and feeds received pulse trains back
//! as [`Capture`]s.

use std::future::Future;
use std::pin::Pin;

use maxxfan_protocol::PulseTrain;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::trace;

use crate::error::{LinkError, LinkResult};

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Emits pulse trains on the physical channel.
///
/// One call transmits exactly one frame. Implementations must not return
/// before the frame has been fully emitted, so that the inter-frame gap is
/// measured from the end of the previous frame.
pub trait Transmitter: Send {
    /// Transmits one pulse train.
    fn transmit<'a>(&'a mut self, train: &'a PulseTrain) -> BoxFuture<'a, LinkResult<()>>;
}

impl<T: Transmitter + ?Sized> Transmitter for Box<T> {
    fn transmit<'a>(&'a mut self, train: &'a PulseTrain) -> BoxFuture<'a, LinkResult<()>> {
        (**self).transmit(train)
    }
}

/// A pulse train captured by a receiver, with its arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub pulses: PulseTrain,
    pub at: Instant,
}

impl Capture {
    /// Creates a capture stamped with the current time.
    pub fn now(pulses: PulseTrain) -> Self {
        Self {
            pulses,
            at: Instant::now(),
        }
    }

    /// Creates a capture with an explicit arrival time.
    pub fn with_time(pulses: PulseTrain, at: Instant) -> Self {
        Self { pulses, at }
    }
}

/// Transmitter that delivers every frame as a [`Capture`] on a channel.
///
/// Wires a sender directly to a receive loop, for loopback testing and for
/// hosts that fan out frames in-process.
#[derive(Debug, Clone)]
pub struct ChannelTransmitter {
    tx: mpsc::Sender<Capture>,
}

impl ChannelTransmitter {
    pub fn new(tx: mpsc::Sender<Capture>) -> Self {
        Self { tx }
    }
}

impl Transmitter for ChannelTransmitter {
    fn transmit<'a>(&'a mut self, train: &'a PulseTrain) -> BoxFuture<'a, LinkResult<()>> {
        Box::pin(async move {
            trace!(pulses = train.len(), "Looping frame back");
            self.tx
                .send(Capture::now(train.clone()))
                .await
                .map_err(|_| LinkError::transmit("capture channel closed"))
        })
    }
}
