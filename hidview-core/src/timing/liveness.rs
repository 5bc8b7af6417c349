//! Upstream connection liveness
//!
//! The host companion application sends packets regularly while it runs.
//! When nothing arrives for the timeout the source is presumed gone.

/// Presence of the upstream packet source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No packet seen within the timeout (initial state)
    Disconnected,
    /// Packets arriving
    Connected,
}

/// Timeout-based presence detection
///
/// Reports a change only on transitions, never per packet.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LivenessMonitor {
    /// Timeout after the last packet (ms)
    timeout_ms: u32,
    state: LinkState,
    /// Time at which the source is declared gone, None while disconnected
    deadline: Option<u64>,
}

impl LivenessMonitor {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            state: LinkState::Disconnected,
            deadline: None,
        }
    }

    /// Record a successfully decoded packet
    ///
    /// Pushes the deadline out and returns `Some(true)` on the transition
    /// to connected.
    pub fn observe(&mut self, now_ms: u64) -> Option<bool> {
        self.deadline = Some(now_ms + self.timeout_ms as u64);

        match self.state {
            LinkState::Connected => None,
            LinkState::Disconnected => {
                info!("host connected");
                self.state = LinkState::Connected;
                Some(true)
            }
        }
    }

    /// Check the deadline
    ///
    /// Returns `Some(false)` on the transition to disconnected. A timer
    /// armed for a deadline that has since moved finds nothing to do.
    pub fn expire(&mut self, now_ms: u64) -> Option<bool> {
        match (self.state, self.deadline) {
            (LinkState::Connected, Some(deadline)) if now_ms >= deadline => {
                info!("host timed out");
                self.state = LinkState::Disconnected;
                self.deadline = None;
                Some(false)
            }
            _ => None,
        }
    }

    /// Deadline to arm the timer for, while connected
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }
}
