//! Split link sender backed by the outbound channel

use hidview_core::traits::{LinkSender, LinkUnavailable};
use hidview_protocol::SplitMessage;

use crate::channels::LINK_OUT;

/// Queues messages for the split TX task without waiting
///
/// A full queue means the UART is not keeping up; the message is dropped.
pub struct ChannelLink;

impl LinkSender for ChannelLink {
    fn try_send(&mut self, msg: SplitMessage) -> Result<(), LinkUnavailable> {
        LINK_OUT.try_send(msg).map_err(|_| LinkUnavailable)
    }
}
