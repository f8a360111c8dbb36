pub mod config;
pub mod consts;
pub mod link;
pub mod node;
pub mod radio;
pub mod sensor;
pub mod storage;
pub mod ui;
pub mod utils;
pub mod wire;

pub use link::LinkError;
pub use radio::{RadioChannel, RadioError};
pub use wire::{DecodeError, Frame};
