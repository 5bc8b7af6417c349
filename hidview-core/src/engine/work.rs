//! Work items for the single notification queue

use hidview_protocol::{RawPacket, SplitMessage};

/// One unit of run-to-completion work
///
/// Ingress tasks and timers only enqueue these; the notification task owns
/// the engine and applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkItem {
    /// Raw report from the host (central)
    HidReport(RawPacket),
    /// Message from the other half (peripheral)
    Split(SplitMessage),
    /// The volume debounce window timer fired
    VolumeWindowElapsed,
    /// The liveness timer fired
    LivenessDeadline,
}

impl WorkItem {
    /// Whether this item was produced by a timer
    pub fn is_timer(&self) -> bool {
        matches!(self, WorkItem::VolumeWindowElapsed | WorkItem::LivenessDeadline)
    }
}
