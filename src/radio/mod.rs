pub mod loopback;
pub mod udp;

use thiserror::Error;

pub use loopback::LoopbackChannel;
pub use udp::UdpChannel;

#[derive(Debug, Error)]
pub enum RadioError {
    /// The channel could not be opened. Fatal at startup; the process
    /// must exit non-zero before entering its main loop.
    #[error("radio channel unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    /// Transient fault on an open channel. Absorbed by the caller; the
    /// frame involved counts as lost.
    #[error("radio i/o fault: {0}")]
    Io(#[source] std::io::Error),
}

/// The half-duplex broadcast medium. No addressing: any node tuned to
/// the same channel observes any frame, and a node never hears its own
/// transmissions. At most one active sender per channel is assumed.
pub trait RadioChannel {
    /// Fire one payload into the medium. Loss is normal and silent.
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioError>;

    /// Non-blocking poll; `Ok(None)` means the medium is silent.
    fn receive(&mut self) -> Result<Option<Vec<u8>>, RadioError>;

    /// Stop participating in the medium. Frames sent towards a released
    /// channel are lost, as if the node were powered off.
    fn release(&mut self);
}
