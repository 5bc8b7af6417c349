//! Packet decoder
//!
//! Pure mapping from raw bytes to a [`Notification`]. Short packets and
//! unknown discriminants decode to `None`; neither is an error.

use crate::notification::Notification;
#[cfg(feature = "media")]
use crate::notification::MediaText;
use crate::packet::{Discriminant, MAX_PACKET_SIZE};

/// Offset of media text within a packet
///
/// Byte 1 is reserved by the current companion application; older revisions
/// started the text at byte 1. Use [`decode_with_text_offset`] to speak to
/// those.
pub const MEDIA_TEXT_OFFSET: usize = 2;

/// Decode a packet with the default media text offset
pub fn decode(bytes: &[u8]) -> Option<Notification> {
    decode_with_text_offset(bytes, MEDIA_TEXT_OFFSET)
}

/// Decode a packet, reading media text from `text_offset`
///
/// Bytes beyond [`MAX_PACKET_SIZE`] are never read.
pub fn decode_with_text_offset(bytes: &[u8], text_offset: usize) -> Option<Notification> {
    let bytes = &bytes[..bytes.len().min(MAX_PACKET_SIZE)];
    let first = *bytes.first()?;

    let Some(discriminant) = Discriminant::from_byte(first) else {
        trace!("ignoring unknown discriminant {=u8:#x}", first);
        return None;
    };

    if bytes.len() < discriminant.min_len() {
        debug!(
            "short packet for {}: {} bytes",
            discriminant,
            bytes.len()
        );
        return None;
    }

    match discriminant {
        Discriminant::Time => Some(Notification::Time {
            hour: bytes[1],
            minute: bytes[2],
        }),
        Discriminant::Volume => Some(Notification::Volume { value: bytes[1] }),
        #[cfg(feature = "layout")]
        Discriminant::Layout => Some(Notification::Layout { value: bytes[1] }),
        #[cfg(feature = "media")]
        Discriminant::MediaArtist => Some(Notification::MediaArtist {
            text: MediaText::from_payload(bytes.get(text_offset..).unwrap_or(&[])),
        }),
        #[cfg(feature = "media")]
        Discriminant::MediaTitle => Some(Notification::MediaTitle {
            text: MediaText::from_payload(bytes.get(text_offset..).unwrap_or(&[])),
        }),
        #[allow(unreachable_patterns)]
        _ => {
            let _ = text_offset;
            trace!("discriminant {} not compiled in", discriminant);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_time() {
        assert_eq!(
            decode(&[0xAA, 13, 45]),
            Some(Notification::Time {
                hour: 13,
                minute: 45
            })
        );
    }

    #[test]
    fn test_decode_time_not_validated() {
        assert_eq!(
            decode(&[0xAA, 200, 255]),
            Some(Notification::Time {
                hour: 200,
                minute: 255
            })
        );
    }

    #[test]
    fn test_decode_short_time() {
        assert_eq!(decode(&[0xAA, 13]), None);
        assert_eq!(decode(&[0xAA]), None);
    }

    #[test]
    fn test_decode_volume() {
        assert_eq!(decode(&[0xAB, 7]), Some(Notification::Volume { value: 7 }));
        assert_eq!(decode(&[0xAB]), None);
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(decode(&[0xFF, 1, 2]), None);
        assert_eq!(decode(&[0x00]), None);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), None);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut report = [0u8; 32];
        report[0] = 0xAB;
        report[1] = 99;
        report[2] = 0xFF;
        assert_eq!(decode(&report), Some(Notification::Volume { value: 99 }));
    }

    #[test]
    fn test_decode_is_pure() {
        let bytes = [0xAA, 8, 30];
        assert_eq!(decode(&bytes), decode(&bytes));
    }

    #[cfg(feature = "layout")]
    #[test]
    fn test_decode_layout() {
        assert_eq!(decode(&[0xAC, 1]), Some(Notification::Layout { value: 1 }));
        assert_eq!(decode(&[0xAC]), None);
    }

    #[cfg(feature = "media")]
    #[test]
    fn test_decode_media_title() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xAE;
        bytes[2..9].copy_from_slice(b"Karma P");
        match decode(&bytes) {
            Some(Notification::MediaTitle { text }) => assert_eq!(text.as_str(), "Karma P"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[cfg(feature = "media")]
    #[test]
    fn test_decode_media_artist_overlong() {
        let mut bytes = [b'z'; 40];
        bytes[0] = 0xAD;
        match decode(&bytes) {
            Some(Notification::MediaArtist { text }) => {
                assert_eq!(text.len(), 30); // 32-byte cap minus discriminant and reserved byte
                assert_eq!(*text.as_bytes_with_nul().last().unwrap(), 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[cfg(feature = "media")]
    #[test]
    fn test_decode_media_text_offset() {
        let bytes = [0xAE, b'H', b'i', 0];
        match decode_with_text_offset(&bytes, 1) {
            Some(Notification::MediaTitle { text }) => assert_eq!(text.as_str(), "Hi"),
            other => panic!("unexpected {:?}", other),
        }
        match decode(&bytes) {
            Some(Notification::MediaTitle { text }) => assert_eq!(text.as_str(), "i"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[cfg(feature = "media")]
    #[test]
    fn test_decode_media_empty_payload() {
        match decode(&[0xAE, 0]) {
            Some(Notification::MediaTitle { text }) => assert!(text.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
