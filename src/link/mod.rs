use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::LinkConfig;
use crate::radio::RadioChannel;
use crate::wire::{AckKind, DecodeError, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LinkError {
    /// No attempt yielded a positive acknowledgement. `last` carries the
    /// final response seen, `None` when every attempt timed out silently
    /// (an implicit NACK).
    #[error("no acknowledgement after {attempts} attempt(s)")]
    Timeout {
        attempts: u32,
        last: Option<Frame>,
    },
}

/// Per-send transient state of the bounded retry loop. Created at send
/// time, discarded once the send resolves.
struct RetryContext {
    attempts_remaining: u32,
    ack_timeout: Duration,
    last_response: Option<Frame>,
}

/// Send one frame and await its acknowledgement, retrying up to the
/// configured attempt budget.
///
/// Each attempt transmits the encoded frame, then polls the channel at
/// `poll_interval` until a response arrives or `ack_timeout` elapses.
/// Only a response strictly equal to the ACK token resolves the send;
/// anything else (NACK, unrelated frame, noise) fails the attempt and
/// the next one starts after `retry_backoff`.
///
/// This is an at-least-once primitive: a lost acknowledgement makes the
/// sender retry a frame the receiver already has, so duplicates on the
/// receiving side are expected and documented.
pub fn send_acknowledged<C: RadioChannel>(
    channel: &mut C,
    frame: &Frame,
    config: &LinkConfig,
) -> Result<(), LinkError> {
    let payload = frame.encode();
    let mut ctx = RetryContext {
        attempts_remaining: config.max_attempts.max(1),
        ack_timeout: config.ack_timeout(),
        last_response: None,
    };

    loop {
        if let Err(err) = channel.send(&payload) {
            // Transmit faults count the same as a silent medium.
            warn!("transmit fault, attempt counts as lost: {err}");
        }

        match await_response(channel, ctx.ack_timeout, config.poll_interval()) {
            Some(Ok(Frame::Ack(AckKind::Ack))) => {
                trace!("acknowledged");
                return Ok(());
            }
            Some(Ok(other)) => {
                debug!("attempt answered with {:?}, not ACK", other);
                ctx.last_response = Some(other);
            }
            Some(Err(_)) => debug!("attempt answered with noise"),
            None => trace!("attempt timed out with no response"),
        }

        ctx.attempts_remaining -= 1;
        if ctx.attempts_remaining == 0 {
            return Err(LinkError::Timeout {
                attempts: config.max_attempts.max(1),
                last: ctx.last_response,
            });
        }
        std::thread::sleep(config.retry_backoff());
    }
}

/// Broadcast a frame with no acknowledgement expected (control tokens).
pub fn broadcast<C: RadioChannel>(channel: &mut C, frame: &Frame) {
    if let Err(err) = channel.send(&frame.encode()) {
        warn!("broadcast of {:?} lost: {err}", frame);
    }
}

/// Poll until one response arrives or the ack timeout elapses. Noise
/// (malformed payloads) ends the wait too: any response at all settles
/// the attempt, and only a strict ACK settles it successfully.
fn await_response<C: RadioChannel>(
    channel: &mut C,
    ack_timeout: Duration,
    poll_interval: Duration,
) -> Option<Result<Frame, DecodeError>> {
    let deadline = Instant::now() + ack_timeout;
    while Instant::now() < deadline {
        match channel.receive() {
            Ok(Some(payload)) => return Some(Frame::decode(&payload)),
            Ok(None) => {}
            Err(err) => warn!("receive fault while awaiting ack: {err}"),
        }
        std::thread::sleep(poll_interval);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::RadioError;
    use crate::sensor::AccelReading;
    use crate::wire::frame::{ACK_TOKEN, NACK_TOKEN};
    use std::collections::VecDeque;

    /// Channel double: records transmissions, plays back one scripted
    /// response per attempt (None = silence for the whole attempt).
    struct ScriptedChannel {
        transmissions: Vec<Vec<u8>>,
        responses: VecDeque<Option<Vec<u8>>>,
        pending: Option<Vec<u8>>,
    }

    impl ScriptedChannel {
        fn new(responses: Vec<Option<&[u8]>>) -> Self {
            Self {
                transmissions: Vec::new(),
                responses: responses
                    .into_iter()
                    .map(|r| r.map(|b| b.to_vec()))
                    .collect(),
                pending: None,
            }
        }
    }

    impl RadioChannel for ScriptedChannel {
        fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
            self.transmissions.push(payload.to_vec());
            self.pending = self.responses.pop_front().flatten();
            Ok(())
        }

        fn receive(&mut self) -> Result<Option<Vec<u8>>, RadioError> {
            Ok(self.pending.take())
        }

        fn release(&mut self) {}
    }

    fn fast_link(max_attempts: u32) -> LinkConfig {
        LinkConfig {
            max_attempts,
            ack_timeout_ms: 5,
            poll_interval_ms: 1,
            retry_backoff_ms: 1,
        }
    }

    fn data_frame() -> Frame {
        Frame::Data(AccelReading::new(1.0, 2.0, 3.0))
    }

    #[test]
    fn first_ack_resolves_without_over_retrying() {
        let mut channel = ScriptedChannel::new(vec![Some(ACK_TOKEN.as_bytes())]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(3));
        assert_eq!(result, Ok(()));
        assert_eq!(channel.transmissions.len(), 1);
    }

    #[test]
    fn silence_exhausts_the_attempt_budget() {
        let mut channel = ScriptedChannel::new(vec![None, None, None]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(3));
        assert_eq!(
            result,
            Err(LinkError::Timeout {
                attempts: 3,
                last: None,
            })
        );
        assert_eq!(channel.transmissions.len(), 3);
    }

    #[test]
    fn nack_fails_the_attempt_and_is_reported_last() {
        let mut channel =
            ScriptedChannel::new(vec![Some(NACK_TOKEN.as_bytes()), Some(NACK_TOKEN.as_bytes())]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(2));
        assert_eq!(
            result,
            Err(LinkError::Timeout {
                attempts: 2,
                last: Some(Frame::Ack(AckKind::Nack)),
            })
        );
        assert_eq!(channel.transmissions.len(), 2);
    }

    #[test]
    fn ack_after_a_failed_attempt_resolves() {
        let mut channel =
            ScriptedChannel::new(vec![Some(&b"done"[..]), Some(ACK_TOKEN.as_bytes())]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(2));
        assert_eq!(result, Ok(()));
        assert_eq!(channel.transmissions.len(), 2);
    }

    #[test]
    fn noise_fails_the_attempt_without_becoming_a_last_response() {
        let mut channel = ScriptedChannel::new(vec![Some(&b"#?%"[..]), None]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(2));
        assert_eq!(
            result,
            Err(LinkError::Timeout {
                attempts: 2,
                last: None,
            })
        );
        assert_eq!(channel.transmissions.len(), 2);
    }

    #[test]
    fn single_attempt_budget_transmits_once() {
        let mut channel = ScriptedChannel::new(vec![None]);
        let result = send_acknowledged(&mut channel, &data_frame(), &fast_link(1));
        assert!(result.is_err());
        assert_eq!(channel.transmissions.len(), 1);
    }
}
