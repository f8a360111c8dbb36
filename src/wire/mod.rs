pub mod frame;

pub use frame::{AckKind, Control, DecodeError, Frame};
