//! Volume update coalescing
//!
//! A fast encoder on the host can report volume many times per second. The
//! first change in a burst is shown right away, later changes inside the
//! window are held, and the settled value is shown when the window closes.

/// Leading/trailing debouncer for volume values
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeDebouncer {
    /// Window length (ms)
    window_ms: u32,
    /// Most recent value from the decoder
    last_received: u8,
    /// Last value handed to the bus, None before the first emission
    last_emitted: Option<u8>,
    /// End of the active window, None when idle
    window_deadline: Option<u64>,
}

impl VolumeDebouncer {
    /// Create a debouncer with the given window
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_received: 0,
            last_emitted: None,
            window_deadline: None,
        }
    }

    /// Record a decoded volume value
    ///
    /// Returns the value to publish now, if any. Opens a new window when
    /// none is active or the previous one has already run out.
    pub fn receive(&mut self, value: u8, now_ms: u64) -> Option<u8> {
        self.last_received = value;

        match self.window_deadline {
            Some(deadline) if now_ms < deadline => {
                trace!("volume {} held until {}", value, deadline);
                None
            }
            _ => {
                self.window_deadline = Some(now_ms + self.window_ms as u64);
                self.take_pending()
            }
        }
    }

    /// Close the window if its deadline has passed
    ///
    /// Returns the trailing value to publish, if it differs from the last
    /// one published. Early or stale calls are no-ops.
    pub fn expire(&mut self, now_ms: u64) -> Option<u8> {
        match self.window_deadline {
            Some(deadline) if now_ms >= deadline => {
                self.window_deadline = None;
                self.take_pending()
            }
            _ => None,
        }
    }

    /// Deadline of the active window, for arming the timer
    pub fn deadline(&self) -> Option<u64> {
        self.window_deadline
    }

    /// Whether a window is open at `now_ms`
    pub fn is_window_active(&self, now_ms: u64) -> bool {
        matches!(self.window_deadline, Some(deadline) if now_ms < deadline)
    }

    pub fn last_received(&self) -> u8 {
        self.last_received
    }

    pub fn last_emitted(&self) -> Option<u8> {
        self.last_emitted
    }

    fn take_pending(&mut self) -> Option<u8> {
        if self.last_emitted == Some(self.last_received) {
            return None;
        }
        self.last_emitted = Some(self.last_received);
        Some(self.last_received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 200;

    #[test]
    fn test_burst_emits_leading_and_trailing() {
        let mut d = VolumeDebouncer::new(W);

        assert_eq!(d.receive(7, 0), Some(7));
        assert_eq!(d.receive(9, 50), None);
        assert_eq!(d.receive(42, 120), None);

        assert_eq!(d.expire(200), Some(42));
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_single_value_no_trailing() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.receive(30, 0), Some(30));
        assert_eq!(d.expire(200), None);
    }

    #[test]
    fn test_burst_back_to_start_value() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.receive(10, 0), Some(10));
        assert_eq!(d.receive(11, 40), None);
        assert_eq!(d.receive(10, 80), None);
        // Settled on the value already shown
        assert_eq!(d.expire(200), None);
    }

    #[test]
    fn test_duplicates_never_emitted() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.receive(5, 0), Some(5));
        assert_eq!(d.expire(200), None);
        assert_eq!(d.receive(5, 500), None);
        assert_eq!(d.expire(700), None);
    }

    #[test]
    fn test_first_zero_is_emitted() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.receive(0, 0), Some(0));
    }

    #[test]
    fn test_early_expire_is_noop() {
        let mut d = VolumeDebouncer::new(W);
        d.receive(1, 0);
        d.receive(2, 10);
        assert_eq!(d.expire(199), None);
        assert!(d.is_window_active(199));
        assert_eq!(d.expire(200), Some(2));
    }

    #[test]
    fn test_elapsed_window_restarts_on_receive() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.receive(1, 0), Some(1));
        assert_eq!(d.receive(2, 100), None);

        // Timer has not run yet, but the window is over: new leading edge
        assert_eq!(d.receive(3, 250), Some(3));
        assert_eq!(d.deadline(), Some(450));

        // The stale timer for the first window finds the new one still open
        assert_eq!(d.expire(260), None);
        assert_eq!(d.expire(450), None);
    }

    #[test]
    fn test_accessors() {
        let mut d = VolumeDebouncer::new(W);
        assert_eq!(d.last_emitted(), None);
        d.receive(4, 0);
        d.receive(8, 1);
        assert_eq!(d.last_received(), 8);
        assert_eq!(d.last_emitted(), Some(4));
    }
}
