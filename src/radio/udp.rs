use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use tracing::{debug, info, trace, warn};

use super::{RadioChannel, RadioError};
use crate::config::RadioConfig;
use crate::consts::UDP_PORT_BASE;

/// Largest payload we accept from the medium. The wire format is a short
/// textual triple; anything bigger is foreign traffic.
const MAX_DATAGRAM: usize = 256;

/// Bytes of node-id tag prefixed to every datagram.
const TAG_LEN: usize = 8;

/// UDP-broadcast stand-in for the short-range radio.
///
/// Every datagram is prefixed with a random per-process node id so a
/// node filters out its own broadcasts, matching the radio truth that a
/// transmitter does not receive itself. The channel id selects the port;
/// nodes on different channels never see each other.
pub struct UdpChannel {
    socket: Option<UdpSocket>,
    node_id: u64,
    broadcast_to: SocketAddrV4,
}

impl UdpChannel {
    /// Open the channel. Data rate and transmit power are part of the
    /// deployment configuration; a socket cannot vary them physically,
    /// so they are applied as logged configuration only.
    pub fn open(config: &RadioConfig) -> Result<Self, RadioError> {
        let port = UDP_PORT_BASE + config.channel as u16;
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port))
            .map_err(RadioError::Unavailable)?;
        socket
            .set_broadcast(true)
            .map_err(RadioError::Unavailable)?;
        socket
            .set_nonblocking(true)
            .map_err(RadioError::Unavailable)?;

        let node_id = rand::random::<u64>();
        info!(
            "radio up: channel {} (udp port {}), rate {:?}, power {}",
            config.channel, port, config.data_rate, config.tx_power
        );
        Ok(Self {
            socket: Some(socket),
            node_id,
            broadcast_to: SocketAddrV4::new(Ipv4Addr::BROADCAST, port),
        })
    }
}

impl RadioChannel for UdpChannel {
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        let Some(socket) = &self.socket else {
            trace!("send on released channel dropped");
            return Ok(());
        };
        let mut datagram = Vec::with_capacity(TAG_LEN + payload.len());
        datagram.extend_from_slice(&self.node_id.to_be_bytes());
        datagram.extend_from_slice(payload);
        match socket.send_to(&datagram, self.broadcast_to) {
            Ok(_) => Ok(()),
            Err(err) => Err(RadioError::Io(err)),
        }
    }

    fn receive(&mut self) -> Result<Option<Vec<u8>>, RadioError> {
        let Some(socket) = &self.socket else {
            return Ok(None);
        };
        let mut buf = [0u8; MAX_DATAGRAM];
        loop {
            match socket.recv_from(&mut buf) {
                Ok((n, _)) => {
                    if n < TAG_LEN {
                        debug!("runt datagram ({} bytes), dropped", n);
                        continue;
                    }
                    let tag = u64::from_be_bytes(buf[..TAG_LEN].try_into().unwrap());
                    if tag == self.node_id {
                        // Our own broadcast looping back through the OS.
                        continue;
                    }
                    return Ok(Some(buf[TAG_LEN..n].to_vec()));
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(err) => return Err(RadioError::Io(err)),
            }
        }
    }

    fn release(&mut self) {
        if self.socket.take().is_some() {
            info!("radio released");
        } else {
            warn!("radio already released");
        }
    }
}
