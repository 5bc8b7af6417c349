//! Central to peripheral relay of raw packets
//!
//! The central mirrors every raw host packet to the peripheral verbatim so
//! both displays decode the same source data. Forwarding is fire-and-forget.

use hidview_protocol::{PacketError, RawPacket, SplitMessage};

use crate::traits::{LinkSender, LinkUnavailable};

/// Errors from the forwarding side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayError {
    /// Buffer is empty or larger than the link payload; nothing was sent
    Packet(PacketError),
    /// The link refused the message; it was dropped
    LinkUnavailable,
}

impl From<PacketError> for RelayError {
    fn from(e: PacketError) -> Self {
        RelayError::Packet(e)
    }
}

impl From<LinkUnavailable> for RelayError {
    fn from(_: LinkUnavailable) -> Self {
        RelayError::LinkUnavailable
    }
}

/// Wrap raw bytes as a passthrough message and hand them to the link
///
/// Oversize or empty buffers are rejected before anything is sent.
pub fn forward<L: LinkSender>(bytes: &[u8], link: &mut L) -> Result<(), RelayError> {
    let msg = SplitMessage::raw_hid(bytes)?;
    link.try_send(msg)?;
    Ok(())
}

/// Forward an already validated packet
pub fn forward_packet<L: LinkSender>(packet: &RawPacket, link: &mut L) -> Result<(), RelayError> {
    link.try_send(SplitMessage::from_packet(packet))?;
    Ok(())
}

/// Extract the packet bytes from an inbound passthrough message
///
/// The buffer has no length field, so the whole fixed buffer is the packet;
/// the decoder's per-type length checks make the padding harmless.
pub fn unwrap(msg: &SplitMessage) -> Option<&[u8]> {
    msg.raw_payload().map(|buf| buf.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidview_protocol::{decode, Notification, SPLIT_PAYLOAD_SIZE};

    /// Link that keeps the last message, or refuses everything
    struct TestLink {
        sent: Option<SplitMessage>,
        up: bool,
    }

    impl LinkSender for TestLink {
        fn try_send(&mut self, msg: SplitMessage) -> Result<(), LinkUnavailable> {
            if !self.up {
                return Err(LinkUnavailable);
            }
            self.sent = Some(msg);
            Ok(())
        }
    }

    fn link_up() -> TestLink {
        TestLink { sent: None, up: true }
    }

    #[test]
    fn test_forward_then_unwrap() {
        let mut link = link_up();
        forward(&[0xAA, 13, 45], &mut link).unwrap();

        let msg = link.sent.unwrap();
        let bytes = unwrap(&msg).unwrap();
        assert_eq!(bytes.len(), SPLIT_PAYLOAD_SIZE);
        assert_eq!(
            decode(bytes),
            Some(Notification::Time {
                hour: 13,
                minute: 45
            })
        );
    }

    #[test]
    fn test_oversize_rejected_before_send() {
        let mut link = link_up();
        assert_eq!(
            forward(&[0xAB; 33], &mut link),
            Err(RelayError::Packet(PacketError::TooLarge { len: 33 }))
        );
        assert!(link.sent.is_none());
    }

    #[test]
    fn test_empty_rejected() {
        let mut link = link_up();
        assert_eq!(
            forward(&[], &mut link),
            Err(RelayError::Packet(PacketError::Empty))
        );
    }

    #[test]
    fn test_link_down_drops() {
        let mut link = TestLink { sent: None, up: false };
        assert_eq!(
            forward(&[0xAB, 1], &mut link),
            Err(RelayError::LinkUnavailable)
        );
    }

    #[test]
    fn test_forward_packet() {
        let mut link = link_up();
        let packet = RawPacket::new(&[0xAB, 77]).unwrap();
        forward_packet(&packet, &mut link).unwrap();
        let msg = link.sent.unwrap();
        assert_eq!(&unwrap(&msg).unwrap()[..2], &[0xAB, 77]);
    }

    #[cfg(feature = "media")]
    #[test]
    fn test_relayed_media_matches_direct() {
        let mut bytes = [0u8; 12];
        bytes[0] = 0xAE;
        bytes[2..12].copy_from_slice(b"Paranoid A");

        let mut link = link_up();
        forward(&bytes, &mut link).unwrap();
        let msg = link.sent.unwrap();

        assert_eq!(decode(unwrap(&msg).unwrap()), decode(&bytes));
    }
}
