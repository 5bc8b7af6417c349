//! Cached notification state for the status widget

use core::fmt::Write;

use heapless::String;
#[cfg(feature = "media")]
use hidview_protocol::MediaText;
use hidview_protocol::Notification;

use crate::bus::Subscriber;

/// Track label shown when nothing is playing
pub const NO_MEDIA_LABEL: &str = "No media";

/// Everything the status widget displays from the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusState {
    pub hour: u8,
    pub minute: u8,
    pub volume: u8,
    pub layout: u8,
    /// Host presence as reported by the liveness monitor
    pub connected: bool,
    #[cfg(feature = "media")]
    pub title: MediaText,
    #[cfg(feature = "media")]
    pub artist: MediaText,
    /// Set on every change, cleared by the renderer after a redraw
    dirty: bool,
}

impl StatusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one notification
    pub fn apply(&mut self, notification: &Notification) {
        match *notification {
            Notification::Time { hour, minute } => {
                self.hour = hour;
                self.minute = minute;
            }
            Notification::Volume { value } => self.volume = value,
            #[cfg(feature = "layout")]
            Notification::Layout { value } => self.layout = value,
            #[cfg(feature = "media")]
            Notification::MediaTitle { text } => {
                self.title = text;
                if text.is_empty() {
                    self.artist.clear();
                }
            }
            #[cfg(feature = "media")]
            Notification::MediaArtist { text } => {
                // An artist without a title has nothing to attach to
                if self.title.is_empty() {
                    return;
                }
                self.artist = text;
            }
            Notification::Connected { value } => {
                self.connected = value;
                if !value {
                    self.clear_media();
                }
            }
            #[allow(unreachable_patterns)]
            _ => return,
        }
        self.dirty = true;
    }

    fn clear_media(&mut self) {
        #[cfg(feature = "media")]
        self.title.clear();
        #[cfg(feature = "media")]
        self.artist.clear();
    }

    /// Clock as `HH:MM`
    pub fn time_label(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}", self.hour, self.minute);
        s
    }

    /// Volume as `vol: N`
    pub fn volume_label(&self) -> String<9> {
        let mut s = String::new();
        let _ = write!(s, "vol: {}", self.volume);
        s
    }

    /// Configured name for the current layout, None when out of range
    pub fn layout_label<'n, S: AsRef<str>>(&self, names: &'n [S]) -> Option<&'n str> {
        names.get(self.layout as usize).map(|s| s.as_ref())
    }

    /// Title, or [`NO_MEDIA_LABEL`] when nothing is playing
    #[cfg(feature = "media")]
    pub fn track_label(&self) -> &str {
        if self.title.is_empty() {
            NO_MEDIA_LABEL
        } else {
            self.title.as_str()
        }
    }

    /// Artist, empty when nothing is playing
    #[cfg(feature = "media")]
    pub fn artist_label(&self) -> &str {
        self.artist.as_str()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark clean after rendering
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Subscriber for StatusState {
    fn on_notification(&mut self, notification: &Notification) {
        self.apply(notification);
    }
}
