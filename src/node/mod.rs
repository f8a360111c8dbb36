pub mod bridge;
pub mod capture;
pub mod pad;
pub mod sender;

use thiserror::Error;

pub use bridge::BridgeNode;
pub use capture::CaptureNode;
pub use pad::{ConsolePad, ScriptedPad, Trigger, TriggerPad};
pub use sender::{SenderNode, SenderState};

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("radio: {0}")]
    Radio(#[from] crate::radio::RadioError),
    #[error("host sink or storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("trigger pad unavailable: {0}")]
    Pad(#[from] ctrlc::Error),
}
