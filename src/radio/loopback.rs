use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::trace;

use super::{RadioChannel, RadioError};

/// In-process medium for tests and demos: two crossed crossbeam
/// channels, one per direction. A send towards a released peer is
/// silently lost, the same as broadcasting into the void.
pub struct LoopbackChannel {
    tx: Sender<Vec<u8>>,
    rx: Option<Receiver<Vec<u8>>>,
}

impl LoopbackChannel {
    /// Create both ends of the medium.
    pub fn pair() -> (LoopbackChannel, LoopbackChannel) {
        let (a_tx, b_rx) = unbounded();
        let (b_tx, a_rx) = unbounded();
        (
            LoopbackChannel {
                tx: a_tx,
                rx: Some(a_rx),
            },
            LoopbackChannel {
                tx: b_tx,
                rx: Some(b_rx),
            },
        )
    }
}

impl RadioChannel for LoopbackChannel {
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        if self.tx.send(payload.to_vec()).is_err() {
            trace!("peer released, frame lost");
        }
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Vec<u8>>, RadioError> {
        let Some(rx) = &self.rx else {
            return Ok(None);
        };
        match rx.try_recv() {
            Ok(payload) => Ok(Some(payload)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }

    fn release(&mut self) {
        self.rx = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cross_between_the_ends() {
        let (mut a, mut b) = LoopbackChannel::pair();
        a.send(b"1.0,2.0,3.0").unwrap();
        assert_eq!(b.receive().unwrap(), Some(b"1.0,2.0,3.0".to_vec()));
        assert_eq!(a.receive().unwrap(), None, "a must not hear itself");
    }

    #[test]
    fn send_into_released_peer_is_lost() {
        let (mut a, mut b) = LoopbackChannel::pair();
        b.release();
        a.send(b"done").unwrap();
        assert_eq!(b.receive().unwrap(), None);
    }
}
