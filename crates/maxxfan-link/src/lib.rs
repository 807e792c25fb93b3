//! Transmission policy for the Maxxfan remote-control link.
//!
//! The radio or infrared channel is lossy and carries no acknowledgements.
//! This crate wraps the codecs of `maxxfan-protocol` with the reliability
//! policy such a link needs:
//! - Repeat bursts: each command is encoded once and transmitted
//!   `repeat_count` times with a fixed gap, cancellable between repeats
//! - Receive-side deduplication: the repeats of one burst collapse into a
//!   single [`CommandEvent`]; noise and foreign frames are dropped silently
//!
//! # Example
//!
//! ```rust
//! use maxxfan_core::Command;
//! use maxxfan_link::{ChannelTransmitter, LinkConfig, Receiver, RepeatSender};
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LinkConfig::default();
//! let (tx, mut rx) = mpsc::channel(8);
//! let mut sender = RepeatSender::new(ChannelTransmitter::new(tx), config.clone())?;
//! let mut receiver = Receiver::new(&config)?;
//!
//! let command = Command::builder().fan_on(true).fan_speed(30).build()?;
//! let report = sender.send(&command).await?;
//! assert_eq!(report.sent, 4);
//!
//! let mut events = Vec::new();
//! while let Ok(capture) = rx.try_recv() {
//!     events.extend(receiver.on_capture(&capture));
//! }
//! assert_eq!(events.len(), 1);
//! # Ok(())
//! # }
//! ```

mod cancel;
mod config;
mod dedup;
mod error;
mod event;
mod receiver;
mod sender;
mod transport;

pub use cancel::CancelHandle;
pub use config::{
    DEFAULT_DEDUP_WINDOW_MS, DEFAULT_INTER_FRAME_GAP_MS, DEFAULT_REPEAT_COUNT, LinkConfig,
};
pub use dedup::Deduplicator;
pub use error::{LinkError, LinkResult};
pub use event::CommandEvent;
pub use receiver::{Receiver, SharedReceiver, run_receive_loop};
pub use sender::{RepeatSender, SendReport};
pub use transport::{BoxFuture, Capture, ChannelTransmitter, Transmitter};
