//! Split link framing
//!
//! The halves talk over a UART byte stream. Each [`SplitMessage`] is postcard
//! encoded and wrapped in a frame so the receiver either gets a whole
//! message or nothing:
//! ```text
//! ┌───────┬────────┬──────┬──────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD      │ CHECKSUM │
//! │ 0x7E  │ 1B     │ 1B   │ postcard     │ XOR      │
//! └───────┴────────┴──────┴──────────────┴──────────┘
//! ```
//! The checksum is the XOR of LENGTH, TYPE and every payload byte.

use heapless::Vec;
use postcard::experimental::max_size::MaxSize;

use crate::split::SplitMessage;

/// Frame synchronization byte
pub const LINK_START: u8 = 0x7E;

/// Frame type for a postcard encoded [`SplitMessage`]
pub const LINK_TYPE_SPLIT: u8 = 0x01;

/// Largest payload a link frame carries
pub const MAX_LINK_PAYLOAD: usize = SplitMessage::POSTCARD_MAX_SIZE;

/// Largest complete frame (START + LENGTH + TYPE + payload + CHECKSUM)
pub const MAX_LINK_FRAME_SIZE: usize = 3 + MAX_LINK_PAYLOAD + 1;

/// Errors from link framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Declared length exceeds [`MAX_LINK_PAYLOAD`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Unknown frame type
    InvalidFrame,
    /// Output buffer too small for encoding
    BufferTooSmall,
    /// Postcard could not encode the message
    Encode,
    /// Postcard could not decode the payload
    Decode,
}

fn checksum(length: u8, frame_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ frame_type, |acc, &b| acc ^ b)
}

/// Encode `msg` as a link frame into `out`
///
/// Returns the number of bytes written.
pub fn encode(msg: &SplitMessage, out: &mut [u8]) -> Result<usize, LinkError> {
    let mut payload = [0u8; MAX_LINK_PAYLOAD];
    let used = postcard::to_slice(msg, &mut payload)
        .map_err(|_| LinkError::Encode)?
        .len();

    let frame_len = 3 + used + 1;
    if out.len() < frame_len {
        return Err(LinkError::BufferTooSmall);
    }

    let length = used as u8;
    out[0] = LINK_START;
    out[1] = length;
    out[2] = LINK_TYPE_SPLIT;
    out[3..3 + used].copy_from_slice(&payload[..used]);
    out[3 + used] = checksum(length, LINK_TYPE_SPLIT, &payload[..used]);

    Ok(frame_len)
}

/// Encode `msg` into a heapless Vec
pub fn encode_to_vec(msg: &SplitMessage) -> Result<Vec<u8, MAX_LINK_FRAME_SIZE>, LinkError> {
    let mut buf = [0u8; MAX_LINK_FRAME_SIZE];
    let len = encode(msg, &mut buf)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(&buf[..len])
        .map_err(|_| LinkError::BufferTooSmall)?;
    Ok(vec)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    Length,
    Type,
    Payload,
    Checksum,
}

/// Byte-at-a-time link frame parser
///
/// Bytes outside a frame are skipped until the next START, so the parser
/// resynchronises after line noise or a half-received frame.
#[derive(Debug, Clone)]
pub struct LinkParser {
    state: ParseState,
    payload: Vec<u8, MAX_LINK_PAYLOAD>,
    length: u8,
    frame_type: u8,
}

impl Default for LinkParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            payload: Vec::new(),
            length: 0,
            frame_type: 0,
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Start;
        self.payload.clear();
        self.length = 0;
        self.frame_type = 0;
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(msg))` when a frame completes, `Ok(None)` while more
    /// bytes are needed, and `Err` when a frame is rejected. The parser is
    /// ready for the next frame after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<SplitMessage>, LinkError> {
        match self.state {
            ParseState::Start => {
                if byte == LINK_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte == 0 {
                    self.reset();
                    return Err(LinkError::InvalidFrame);
                }
                if byte as usize > MAX_LINK_PAYLOAD {
                    self.reset();
                    return Err(LinkError::PayloadTooLarge);
                }
                self.length = byte;
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.frame_type = byte;
                self.payload.clear();
                self.state = ParseState::Payload;
                Ok(None)
            }
            ParseState::Payload => {
                // Bounded by the length check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = checksum(self.length, self.frame_type, &self.payload);
                let result = if byte != expected {
                    Err(LinkError::InvalidChecksum)
                } else if self.frame_type != LINK_TYPE_SPLIT {
                    Err(LinkError::InvalidFrame)
                } else {
                    postcard::from_bytes::<SplitMessage>(&self.payload)
                        .map(Some)
                        .map_err(|_| LinkError::Decode)
                };
                self.reset();
                result
            }
        }
    }

    /// Feed bytes until the first complete message
    ///
    /// Bytes after that message are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<SplitMessage>, LinkError> {
        for &byte in bytes {
            if let Some(msg) = self.feed(byte)? {
                return Ok(Some(msg));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume_msg(value: u8) -> SplitMessage {
        SplitMessage::raw_hid(&[0xAB, value]).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let msg = volume_msg(3);
        let mut buf = [0u8; MAX_LINK_FRAME_SIZE];
        let len = encode(&msg, &mut buf).unwrap();

        assert_eq!(buf[0], LINK_START);
        assert_eq!(buf[1] as usize, len - 4);
        assert_eq!(buf[2], LINK_TYPE_SPLIT);
        // postcard variant tag, then the raw buffer
        assert_eq!(buf[3], 0);
        assert_eq!(&buf[4..6], &[0xAB, 3]);
    }

    #[test]
    fn test_frame_roundtrip() {
        let msg = SplitMessage::raw_hid(&[0xAA, 23, 59]).unwrap();
        let encoded = encode_to_vec(&msg).unwrap();

        let mut parser = LinkParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Ok(Some(msg)));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 8];
        assert_eq!(
            encode(&volume_msg(1), &mut buf),
            Err(LinkError::BufferTooSmall)
        );
    }

    #[test]
    fn test_invalid_checksum() {
        let mut encoded = encode_to_vec(&volume_msg(9)).unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = LinkParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(LinkError::InvalidChecksum));
    }

    #[test]
    fn test_unknown_frame_type() {
        let mut encoded = encode_to_vec(&volume_msg(9)).unwrap();
        let last = encoded.len() - 1;
        // Change the type and patch the checksum to match
        encoded[2] = 0x55;
        encoded[last] ^= LINK_TYPE_SPLIT ^ 0x55;

        let mut parser = LinkParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(LinkError::InvalidFrame));
    }

    #[test]
    fn test_oversize_length_rejected() {
        let mut parser = LinkParser::new();
        assert_eq!(parser.feed(LINK_START), Ok(None));
        assert_eq!(parser.feed(0xFF), Err(LinkError::PayloadTooLarge));
    }

    #[test]
    fn test_resync_after_garbage() {
        let encoded = encode_to_vec(&volume_msg(50)).unwrap();

        let mut data = Vec::<u8, 64>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = LinkParser::new();
        assert_eq!(parser.feed_bytes(&data), Ok(Some(volume_msg(50))));
    }

    #[test]
    fn test_recovers_after_error() {
        let mut bad = encode_to_vec(&volume_msg(1)).unwrap();
        let last = bad.len() - 1;
        bad[last] ^= 0x01;
        let good = encode_to_vec(&volume_msg(2)).unwrap();

        let mut parser = LinkParser::new();
        assert!(parser.feed_bytes(&bad).is_err());
        assert_eq!(parser.feed_bytes(&good), Ok(Some(volume_msg(2))));
    }
}
