use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace, warn};

use super::NodeError;
use crate::config::BridgeConfig;
use crate::consts::DISPLAY_CAPACITY;
use crate::radio::RadioChannel;
use crate::ui::{Indicator, glyphs};
use crate::wire::{Control, DecodeError, Frame};

/// The receiving node: a pure forwarder between the radio channel and
/// the host's serial sink.
///
/// The bridge never transmits an acknowledgement; the handshake is
/// asymmetric and lives entirely on the sender side. Session boundaries
/// are inferred from the reception counter and the control tokens, and
/// the counter deliberately counts received frames, retry duplicates
/// included, not unique samples.
pub struct BridgeNode<C, I, W> {
    channel: C,
    indicator: I,
    sink: W,
    config: BridgeConfig,
    running: Arc<AtomicBool>,
    frames_received: u32,
}

impl<C, I, W> BridgeNode<C, I, W>
where
    C: RadioChannel,
    I: Indicator,
    W: Write,
{
    pub fn new(
        channel: C,
        indicator: I,
        sink: W,
        config: BridgeConfig,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            channel,
            indicator,
            sink,
            config,
            running,
            frames_received: 0,
        }
    }

    pub fn frames_received(&self) -> u32 {
        self.frames_received
    }

    /// Listen until an exit token arrives or the teardown flag clears,
    /// then release the channel.
    pub fn run(&mut self) -> Result<(), NodeError> {
        info!("=== Bridge Mode ===");
        self.indicator.show(&glyphs::SHUTDOWN);

        while self.running.load(Ordering::SeqCst) {
            match self.channel.receive() {
                Ok(Some(payload)) => {
                    if !self.handle_payload(&payload)? {
                        break;
                    }
                }
                Ok(None) => std::thread::sleep(self.config.poll_interval()),
                Err(err) => {
                    warn!("radio fault, frame lost: {err}");
                    self.indicator.show(&glyphs::ERROR);
                    std::thread::sleep(self.config.poll_interval());
                }
            }
        }

        self.channel.release();
        info!("bridge loop finished");
        Ok(())
    }

    /// Forward and classify one received payload. Returns `false` once
    /// the session told us to shut down.
    fn handle_payload(&mut self, payload: &[u8]) -> Result<bool, NodeError> {
        let frame = match Frame::decode(payload) {
            Ok(frame) => frame,
            Err(DecodeError::Malformed) => {
                trace!("noise dropped ({} bytes)", payload.len());
                return Ok(true);
            }
        };

        // One line per decoded event, payload verbatim.
        self.sink.write_all(payload)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;

        match frame {
            Frame::Data(_) => {
                if self.frames_received == 0 {
                    self.indicator.clear();
                }
                let c = self.frames_received;
                self.indicator.set_pixel((c % 5) as usize, (c / 5) as usize);
                self.frames_received = if c >= DISPLAY_CAPACITY - 1 { 0 } else { c + 1 };
            }
            Frame::Control(Control::Done) => {
                debug!("session complete after {} frame(s)", self.frames_received);
                self.frames_received = 0;
                self.indicator.show(&glyphs::SESSION_DONE);
            }
            Frame::Control(Control::Exit) => {
                info!("exit token received, shutting down");
                self.indicator.show(&glyphs::SHUTDOWN);
                std::thread::sleep(self.config.shutdown_hold());
                self.indicator.clear();
                return Ok(false);
            }
            Frame::Ack(_) => {
                // Stray acknowledgement from some sender's handshake:
                // forwarded above like any decoded event, no bookkeeping.
                trace!("stray ack observed");
            }
        }
        Ok(true)
    }
}
