use tracing::{debug, info, warn};

use super::pad::{Trigger, TriggerPad};
use crate::config::SenderConfig;
use crate::consts::DISPLAY_CAPACITY;
use crate::link;
use crate::radio::RadioChannel;
use crate::sensor::{Accelerometer, Sampler};
use crate::ui::{Indicator, countdown, glyphs};
use crate::wire::{Control, Frame};

/// Named states of the transmitter. One transition is dispatched per
/// tick; there is no fatal path inside the machine, the only way out is
/// the operator's exit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    Ready,
    Sampling,
    Exit,
}

/// The sensor node's telemetry mode: waits for a trigger, then streams
/// one fixed-duration burst of accelerometer samples over the link.
pub struct SenderNode<C, A, P, I> {
    channel: C,
    accel: A,
    pad: P,
    indicator: I,
    config: SenderConfig,
    state: SenderState,
}

impl<C, A, P, I> SenderNode<C, A, P, I>
where
    C: RadioChannel,
    A: Accelerometer,
    P: TriggerPad,
    I: Indicator,
{
    pub fn new(channel: C, accel: A, pad: P, indicator: I, config: SenderConfig) -> Self {
        Self {
            channel,
            accel,
            pad,
            indicator,
            config,
            state: SenderState::Ready,
        }
    }

    pub fn state(&self) -> SenderState {
        self.state
    }

    /// Drive the machine until the operator exits, pacing the ready
    /// state at the configured tick.
    pub fn run(mut self) {
        info!("=== Sender Mode ===");
        loop {
            match self.step() {
                SenderState::Exit => break,
                SenderState::Ready => std::thread::sleep(self.config.ready_tick()),
                SenderState::Sampling => {}
            }
        }
        self.channel.release();
    }

    /// Dispatch exactly one transition.
    pub fn step(&mut self) -> SenderState {
        match self.state {
            SenderState::Ready => match self.pad.poll() {
                Some(Trigger::Confirm) => {
                    self.state = SenderState::Sampling;
                }
                Some(Trigger::Cancel) => {
                    // Replay request towards the bridge; no ack expected.
                    debug!("cancel pressed, broadcasting session end");
                    link::broadcast(&mut self.channel, &Frame::Control(Control::Done));
                }
                Some(Trigger::Exit) => {
                    info!("operator exit");
                    link::broadcast(&mut self.channel, &Frame::Control(Control::Exit));
                    self.indicator.show(&glyphs::SHUTDOWN);
                    self.state = SenderState::Exit;
                }
                None => self.indicator.show(&glyphs::IDLE_ARROW),
            },
            SenderState::Sampling => {
                self.run_burst();
                self.state = SenderState::Ready;
            }
            SenderState::Exit => {}
        }
        self.state
    }

    /// One sampling burst: countdown, then encode-and-send every sample
    /// at full cadence. Link timeouts are absorbed; a lost sample is
    /// never requeued because a retransmission would cost cadence.
    fn run_burst(&mut self) {
        countdown(
            &mut self.indicator,
            self.config.countdown_secs,
            self.config.countdown_tick(),
        );
        self.indicator.show(&glyphs::TARGET);

        let mut sent: u32 = 0;
        let mut lost: u32 = 0;
        for sample in Sampler::new(&mut self.accel, &self.config.sampler) {
            if sent == 0 {
                self.indicator.clear();
            }
            let frame = Frame::Data(sample.reading);
            if let Err(err) = link::send_acknowledged(&mut self.channel, &frame, &self.config.link)
            {
                debug!("sample {} lost: {err}", sample.seq);
                lost += 1;
            }
            // Burst progress fill, rotated for wrist mounting.
            self.indicator
                .set_pixel(4 - (sent / 5) as usize, (sent % 5) as usize);
            sent = if sent >= DISPLAY_CAPACITY - 1 { 0 } else { sent + 1 };
        }

        link::broadcast(&mut self.channel, &Frame::Control(Control::Done));
        if lost > 0 {
            warn!("burst finished with {} unacknowledged sample(s)", lost);
        }
        info!("burst finished, back to ready");
    }
}
