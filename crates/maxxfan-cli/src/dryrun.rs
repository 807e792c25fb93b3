//! Transmitter that prints frames instead of emitting them.

use std::io::Write;

use maxxfan_link::{BoxFuture, LinkResult, Transmitter};
use maxxfan_protocol::PulseTrain;
use tracing::trace;

/// Writes one line per transmitted frame.
#[derive(Debug)]
pub struct DryRunTransmitter<W> {
    out: W,
    frames: u32,
}

impl<W: Write + Send> DryRunTransmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Transmitter for DryRunTransmitter<W> {
    fn transmit<'a>(&'a mut self, train: &'a PulseTrain) -> BoxFuture<'a, LinkResult<()>> {
        Box::pin(async move {
            let frame = self.frames + 1;
            trace!(frame, pulses = train.len(), "Dry-run transmit");
            writeln!(
                self.out,
                "frame {} ({} us): {}",
                frame,
                train.total_duration_us(),
                train
            )?;
            self.out.flush()?;
            self.frames = frame;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_numbered_frames() {
        let mut transmitter = DryRunTransmitter::new(Vec::new());
        let train = PulseTrain::from_signed(&[3200, -1600, 400]);

        transmitter.transmit(&train).await.unwrap();
        transmitter.transmit(&train).await.unwrap();
        assert_eq!(transmitter.frames(), 2);

        let out = String::from_utf8(transmitter.into_inner()).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r"
        frame 1 (5200 us): [3200, -1600, 400]
        frame 2 (5200 us): [3200, -1600, 400]
        ");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_write_is_not_counted() {
        let mut transmitter = DryRunTransmitter::new(BrokenPipe);
        let train = PulseTrain::from_signed(&[3200, -1600, 400]);

        assert!(transmitter.transmit(&train).await.is_err());
        assert_eq!(transmitter.frames(), 0);
    }
}
