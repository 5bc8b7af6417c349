//! Configuration type definitions

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum layout label length
pub const MAX_LAYOUT_LABEL_LEN: usize = 8;

/// Maximum number of configured layouts
pub const MAX_LAYOUTS: usize = 8;

/// Default volume debounce window
pub const DEFAULT_VOLUME_WINDOW_MS: u32 = 200;

/// Default time without packets before the host is presumed gone
pub const DEFAULT_LIVENESS_TIMEOUT_MS: u32 = 3000;

/// Default media text offset (byte 1 reserved)
pub const DEFAULT_MEDIA_TEXT_OFFSET: u8 = 2;

/// Which half of the split keyboard this firmware runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Talks to the host and relays raw packets to the peripheral
    #[default]
    Central,
    /// Receives relayed packets from the central
    Peripheral,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce window of zero
    ZeroVolumeWindow,
    /// Liveness timeout of zero
    ZeroLivenessTimeout,
    /// Media text offset outside 1..=2
    InvalidTextOffset(u8),
}

/// Notification engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotifyConfig {
    /// Split role
    pub role: Role,
    /// Volume coalescing window (ms)
    pub volume_window_ms: u32,
    /// Connection liveness timeout (ms)
    pub liveness_timeout_ms: u32,
    /// Byte offset of media text within a packet
    pub media_text_offset: u8,
    /// Layout names, indexed by the layout packet value
    pub layouts: Vec<String<MAX_LAYOUT_LABEL_LEN>, MAX_LAYOUTS>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        let mut layouts = Vec::new();
        for name in ["EN", "RU"] {
            let mut label = String::new();
            let _ = label.push_str(name);
            let _ = layouts.push(label);
        }

        Self {
            role: Role::Central,
            volume_window_ms: DEFAULT_VOLUME_WINDOW_MS,
            liveness_timeout_ms: DEFAULT_LIVENESS_TIMEOUT_MS,
            media_text_offset: DEFAULT_MEDIA_TEXT_OFFSET,
            layouts,
        }
    }
}

impl NotifyConfig {
    /// Default configuration for the given role
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.volume_window_ms == 0 {
            return Err(ConfigError::ZeroVolumeWindow);
        }
        if self.liveness_timeout_ms == 0 {
            return Err(ConfigError::ZeroLivenessTimeout);
        }
        if !(1..=2).contains(&self.media_text_offset) {
            return Err(ConfigError::InvalidTextOffset(self.media_text_offset));
        }
        Ok(())
    }

    /// Name of the layout at `index`, if configured
    pub fn layout_name(&self, index: u8) -> Option<&str> {
        self.layouts.get(index as usize).map(|s| s.as_str())
    }

    /// Append a layout name, truncating it to [`MAX_LAYOUT_LABEL_LEN`]
    ///
    /// Returns false when the layout list is full.
    pub fn push_layout(&mut self, name: &str) -> bool {
        let mut label = String::new();
        for ch in name.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        self.layouts.push(label).is_ok()
    }
}
