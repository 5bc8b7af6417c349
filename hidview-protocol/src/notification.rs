//! Typed notifications produced from packets

use core::fmt;

/// Maximum media text length in bytes, terminator excluded
pub const MEDIA_TEXT_CAPACITY: usize = 31;

/// Bounded, always-terminated media text
///
/// Holds at most [`MEDIA_TEXT_CAPACITY`] bytes of valid UTF-8 with no
/// interior NUL, followed by a NUL terminator. Construction truncates
/// instead of failing, so a value of this type always upholds the bounds.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MediaText {
    buf: [u8; MEDIA_TEXT_CAPACITY + 1],
    len: u8,
}

impl Default for MediaText {
    fn default() -> Self {
        Self::empty()
    }
}

impl MediaText {
    /// Empty text
    pub const fn empty() -> Self {
        Self {
            buf: [0; MEDIA_TEXT_CAPACITY + 1],
            len: 0,
        }
    }

    /// Build from an untrusted payload
    ///
    /// Copying stops at the first NUL or after [`MEDIA_TEXT_CAPACITY`]
    /// bytes, whichever comes first. A trailing partial UTF-8 sequence (or
    /// anything after the first invalid byte) is dropped.
    pub fn from_payload(payload: &[u8]) -> Self {
        let window = &payload[..payload.len().min(MEDIA_TEXT_CAPACITY)];
        let end = window.iter().position(|&b| b == 0).unwrap_or(window.len());
        let text = &window[..end];

        let valid = match core::str::from_utf8(text) {
            Ok(s) => s.len(),
            Err(e) => e.valid_up_to(),
        };

        let mut out = Self::empty();
        out.buf[..valid].copy_from_slice(&text[..valid]);
        out.len = valid as u8;
        out
    }

    /// Build from a string, truncating on a character boundary
    pub fn from_str_truncated(text: &str) -> Self {
        Self::from_payload(text.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Text bytes, terminator excluded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Text bytes with the trailing NUL
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl fmt::Debug for MediaText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for MediaText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MediaText {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

/// A decoded notification, one variant per compiled-in packet type plus the
/// connection state raised by the liveness monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Host clock (not range checked)
    Time { hour: u8, minute: u8 },
    /// Host output volume
    Volume { value: u8 },
    /// Index into the configured layout name list
    #[cfg(feature = "layout")]
    Layout { value: u8 },
    #[cfg(feature = "media")]
    MediaTitle { text: MediaText },
    #[cfg(feature = "media")]
    MediaArtist { text: MediaText },
    /// Upstream source presence
    Connected { value: bool },
}

impl Notification {
    /// Whether this notification came from the packet stream
    /// (as opposed to the liveness monitor)
    pub fn is_packet(&self) -> bool {
        !matches!(self, Notification::Connected { .. })
    }
}
