// Wire format: "<x>,<y>,<z>" for data, reserved literals for everything
// else. No length prefix, no checksum; a frame is one radio payload.

use thiserror::Error;

use crate::sensor::AccelReading;

/// Positive acknowledgement token.
pub const ACK_TOKEN: &str = "0";
/// Negative acknowledgement token.
pub const NACK_TOKEN: &str = "1";
/// End-of-session control token.
pub const DONE_TOKEN: &str = "done";
/// Shutdown control token.
pub const EXIT_TOKEN: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Done,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckKind {
    Ack,
    Nack,
}

/// One discrete unit of wire-transmitted information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Data(AccelReading),
    Control(Control),
    Ack(AckKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Unparseable payload; treated as channel noise and discarded.
    #[error("malformed frame payload")]
    Malformed,
}

impl Frame {
    /// Serialize to the textual wire representation. Float fields use the
    /// shortest round-tripping form (`1.0` stays `"1.0"`, never `"1"`).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Frame::Data(r) => format!("{:?},{:?},{:?}", r.x, r.y, r.z).into_bytes(),
            Frame::Control(Control::Done) => DONE_TOKEN.as_bytes().to_vec(),
            Frame::Control(Control::Exit) => EXIT_TOKEN.as_bytes().to_vec(),
            Frame::Ack(AckKind::Ack) => ACK_TOKEN.as_bytes().to_vec(),
            Frame::Ack(AckKind::Nack) => NACK_TOKEN.as_bytes().to_vec(),
        }
    }

    /// Classify and parse a received payload.
    ///
    /// Classification is two-step, first-match-wins: reserved literals
    /// are checked before the data parse, so a payload equal to e.g.
    /// `"done"` is always the control frame, never data. Anything that is
    /// neither a reserved literal nor three comma-separated numbers is
    /// `Malformed`.
    pub fn decode(payload: &[u8]) -> Result<Frame, DecodeError> {
        let text = std::str::from_utf8(payload).map_err(|_| DecodeError::Malformed)?;
        match text {
            DONE_TOKEN => return Ok(Frame::Control(Control::Done)),
            EXIT_TOKEN => return Ok(Frame::Control(Control::Exit)),
            ACK_TOKEN => return Ok(Frame::Ack(AckKind::Ack)),
            NACK_TOKEN => return Ok(Frame::Ack(AckKind::Nack)),
            _ => {}
        }

        let axis = |field: Option<&str>| -> Result<f32, DecodeError> {
            field
                .ok_or(DecodeError::Malformed)?
                .trim()
                .parse()
                .map_err(|_| DecodeError::Malformed)
        };
        let mut fields = text.split(',');
        let x = axis(fields.next())?;
        let y = axis(fields.next())?;
        let z = axis(fields.next())?;
        if fields.next().is_some() {
            return Err(DecodeError::Malformed);
        }
        Ok(Frame::Data(AccelReading::new(x, y, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn data_round_trip() {
        let frame = Frame::Data(AccelReading::new(1.0, -2.5, 0.125));
        let bytes = frame.encode();
        assert_eq!(bytes, b"1.0,-2.5,0.125");
        assert_eq!(Frame::decode(&bytes), Ok(frame));
    }

    #[test]
    fn reserved_literals_take_precedence_over_data() {
        assert_eq!(Frame::decode(b"done"), Ok(Frame::Control(Control::Done)));
        assert_eq!(Frame::decode(b"exit"), Ok(Frame::Control(Control::Exit)));
        assert_eq!(Frame::decode(b"0"), Ok(Frame::Ack(AckKind::Ack)));
        assert_eq!(Frame::decode(b"1"), Ok(Frame::Ack(AckKind::Nack)));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for payload in [
            &b""[..],
            &b"1.0,2.0"[..],
            &b"1.0,2.0,3.0,4.0"[..],
            &b"a,b,c"[..],
            &b"1.0;2.0;3.0"[..],
            &b"done "[..],
            &[0xff, 0xfe, 0x00][..],
        ] {
            assert_eq!(Frame::decode(payload), Err(DecodeError::Malformed));
        }
    }

    #[test]
    fn whole_valued_floats_keep_their_fraction_on_the_wire() {
        let bytes = Frame::Data(AccelReading::new(1.0, 2.0, 3.0)).encode();
        assert_eq!(bytes, b"1.0,2.0,3.0");
    }

    proptest! {
        #[test]
        fn any_finite_triple_round_trips(
            x in -16.0f32..16.0,
            y in -16.0f32..16.0,
            z in -16.0f32..16.0,
        ) {
            let frame = Frame::Data(AccelReading::new(x, y, z));
            prop_assert_eq!(Frame::decode(&frame.encode()), Ok(frame));
        }
    }
}
