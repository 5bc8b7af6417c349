//! Raw packets as they arrive from the host or the split link

use heapless::Vec;

/// Largest packet the protocol carries (one raw HID report)
pub const MAX_PACKET_SIZE: usize = 32;

/// Packet type identifier, the first byte of every packet
///
/// Values are fixed by the companion application and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Discriminant {
    /// Wall clock time
    Time = 0xAA,
    /// Output volume
    Volume = 0xAB,
    /// Active keyboard layout
    Layout = 0xAC,
    /// Now-playing artist
    MediaArtist = 0xAD,
    /// Now-playing title
    MediaTitle = 0xAE,
}

impl Discriminant {
    /// Parse a discriminant from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0xAA => Some(Discriminant::Time),
            0xAB => Some(Discriminant::Volume),
            0xAC => Some(Discriminant::Layout),
            0xAD => Some(Discriminant::MediaArtist),
            0xAE => Some(Discriminant::MediaTitle),
            _ => None,
        }
    }

    /// Wire byte for this discriminant
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Smallest packet length (discriminant included) that carries a
    /// complete payload for this type
    pub fn min_len(self) -> usize {
        match self {
            Discriminant::Time => 3,
            Discriminant::Volume | Discriminant::Layout => 2,
            // Media text may be empty; only the reserved byte is required
            Discriminant::MediaArtist | Discriminant::MediaTitle => 2,
        }
    }
}

/// Errors when building a packet from an ingress buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Zero-length buffer
    Empty,
    /// Buffer exceeds [`MAX_PACKET_SIZE`]
    TooLarge { len: usize },
}

/// An immutable packet of 1..=32 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPacket {
    bytes: Vec<u8, MAX_PACKET_SIZE>,
}

impl RawPacket {
    /// Copy `bytes` into a packet, checking the length bounds
    pub fn new(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.is_empty() {
            return Err(PacketError::Empty);
        }

        let mut vec = Vec::new();
        vec.extend_from_slice(bytes)
            .map_err(|_| PacketError::TooLarge { len: bytes.len() })?;

        Ok(Self { bytes: vec })
    }

    /// The raw discriminant byte
    pub fn discriminant_byte(&self) -> u8 {
        self.bytes[0]
    }

    /// The discriminant, if it is one this firmware knows
    pub fn discriminant(&self) -> Option<Discriminant> {
        Discriminant::from_byte(self.discriminant_byte())
    }

    /// All bytes, discriminant included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for RawPacket {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
