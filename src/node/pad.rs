use std::collections::VecDeque;
use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::{debug, info};

/// One operator action, as seen by the state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The "confirm" input: start a burst.
    Confirm,
    /// The "cancel/replay" input.
    Cancel,
    /// Operator shutdown request.
    Exit,
}

/// The two physical buttons of the node, polled once per tick. At most
/// one trigger is delivered per poll.
pub trait TriggerPad {
    fn poll(&mut self) -> Option<Trigger>;
}

/// Console stand-in for the physical buttons: a helper thread reads
/// stdin lines (`a` = confirm, `b` = cancel, `q` = exit) and hands them
/// off over a channel; Ctrl-C maps to the exit trigger.
pub struct ConsolePad {
    rx: Receiver<Trigger>,
}

impl ConsolePad {
    pub fn new() -> Result<Self, ctrlc::Error> {
        let (tx, rx) = unbounded();

        let ctrlc_tx = tx.clone();
        ctrlc::set_handler(move || {
            let _ = ctrlc_tx.send(Trigger::Exit);
        })?;

        thread::spawn(move || Self::read_loop(tx));
        info!("trigger pad ready: a = confirm, b = cancel, q = exit");
        Ok(Self { rx })
    }

    fn read_loop(tx: Sender<Trigger>) {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trigger = match line.trim() {
                "a" => Trigger::Confirm,
                "b" => Trigger::Cancel,
                "q" => Trigger::Exit,
                other => {
                    debug!("unrecognized pad input {:?}", other);
                    continue;
                }
            };
            if tx.send(trigger).is_err() {
                break;
            }
        }
        // Stdin closed; treat it like an operator exit.
        let _ = tx.send(Trigger::Exit);
    }
}

impl TriggerPad for ConsolePad {
    fn poll(&mut self) -> Option<Trigger> {
        match self.rx.try_recv() {
            Ok(trigger) => Some(trigger),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Trigger::Exit),
        }
    }
}

/// Pad double driven by a fixed script; each poll pops one entry.
/// An exhausted script keeps returning the exit trigger so a state
/// machine under test always terminates.
pub struct ScriptedPad {
    script: VecDeque<Option<Trigger>>,
}

impl ScriptedPad {
    pub fn new(script: impl IntoIterator<Item = Option<Trigger>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl TriggerPad for ScriptedPad {
    fn poll(&mut self) -> Option<Trigger> {
        self.script.pop_front().unwrap_or(Some(Trigger::Exit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_pad_plays_then_exits() {
        let mut pad = ScriptedPad::new([None, Some(Trigger::Confirm)]);
        assert_eq!(pad.poll(), None);
        assert_eq!(pad.poll(), Some(Trigger::Confirm));
        assert_eq!(pad.poll(), Some(Trigger::Exit));
        assert_eq!(pad.poll(), Some(Trigger::Exit));
    }
}
