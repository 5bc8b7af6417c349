//! Split link send side

use hidview_protocol::SplitMessage;

/// The outbound link could not take the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkUnavailable;

/// Best-effort sender to the other half
///
/// Implementations must not block. When the link is down or its queue is
/// full they return [`LinkUnavailable`] and the message is dropped; there is
/// no retry.
pub trait LinkSender {
    fn try_send(&mut self, msg: SplitMessage) -> Result<(), LinkUnavailable>;
}

/// Sender for builds without a split link
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLink;

impl LinkSender for NoLink {
    fn try_send(&mut self, _msg: SplitMessage) -> Result<(), LinkUnavailable> {
        Err(LinkUnavailable)
    }
}
