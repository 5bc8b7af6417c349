//! Messages exchanged between the central and peripheral halves

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::packet::{PacketError, RawPacket, MAX_PACKET_SIZE};

/// Size of the raw buffer carried by [`SplitMessage::RawHid`]
pub const SPLIT_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE;

/// Message sent from the central to the peripheral over the split link
///
/// The raw HID variant carries a fixed-size buffer with no length field.
/// Packets shorter than the buffer are zero padded, and the receiver treats
/// the whole buffer as the packet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SplitMessage {
    /// Raw passthrough of a host packet
    RawHid([u8; SPLIT_PAYLOAD_SIZE]),
}

impl SplitMessage {
    /// Wrap packet bytes for relay
    ///
    /// Rejects empty buffers and buffers larger than the link payload.
    pub fn raw_hid(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.is_empty() {
            return Err(PacketError::Empty);
        }
        if bytes.len() > SPLIT_PAYLOAD_SIZE {
            return Err(PacketError::TooLarge { len: bytes.len() });
        }

        let mut buf = [0u8; SPLIT_PAYLOAD_SIZE];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(SplitMessage::RawHid(buf))
    }

    /// Wrap an already validated packet
    pub fn from_packet(packet: &RawPacket) -> Self {
        let mut buf = [0u8; SPLIT_PAYLOAD_SIZE];
        buf[..packet.len()].copy_from_slice(packet.as_bytes());
        SplitMessage::RawHid(buf)
    }

    /// The embedded raw packet buffer, if this is a passthrough message
    pub fn raw_payload(&self) -> Option<&[u8; SPLIT_PAYLOAD_SIZE]> {
        match self {
            SplitMessage::RawHid(buf) => Some(buf),
        }
    }
}
