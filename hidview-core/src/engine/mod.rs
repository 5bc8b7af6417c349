//! Notification engine
//!
//! Ties the decoder, volume debouncer, liveness monitor and relay together
//! for one board. Every method runs to completion; the caller serialises
//! calls through a single work queue and passes the current time.

pub mod work;

pub use work::WorkItem;

use hidview_protocol::{decode_with_text_offset, Notification, RawPacket, SplitMessage};

use crate::bus::Publish;
use crate::config::{NotifyConfig, Role};
use crate::relay::{self, RelayError};
use crate::timing::{LivenessMonitor, VolumeDebouncer};
use crate::traits::LinkSender;

/// Per-device notification state machine
#[derive(Debug, Clone)]
pub struct NotifyEngine {
    role: Role,
    text_offset: usize,
    debouncer: VolumeDebouncer,
    liveness: LivenessMonitor,
}

impl NotifyEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            role: config.role,
            text_offset: config.media_text_offset as usize,
            debouncer: VolumeDebouncer::new(config.volume_window_ms),
            liveness: LivenessMonitor::new(config.liveness_timeout_ms),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Process one queued work item
    pub fn handle<P: Publish, L: LinkSender>(
        &mut self,
        item: &WorkItem,
        now_ms: u64,
        bus: &mut P,
        link: &mut L,
    ) {
        match item {
            WorkItem::HidReport(packet) => self.on_hid_packet(packet, now_ms, bus, link),
            WorkItem::Split(msg) => self.on_split_message(msg, now_ms, bus),
            WorkItem::VolumeWindowElapsed => self.on_volume_window(now_ms, bus),
            WorkItem::LivenessDeadline => self.on_liveness_deadline(now_ms, bus),
        }
    }

    /// Raw HID report from the host
    ///
    /// Reports that do not fit a packet are dropped before relay or decode.
    pub fn on_hid_report<P: Publish, L: LinkSender>(
        &mut self,
        bytes: &[u8],
        now_ms: u64,
        bus: &mut P,
        link: &mut L,
    ) {
        match RawPacket::new(bytes) {
            Ok(packet) => self.on_hid_packet(&packet, now_ms, bus, link),
            Err(e) => warn!("dropping HID report: {}", e),
        }
    }

    /// Validated packet from the host
    ///
    /// On the central the bytes are mirrored to the peripheral before they
    /// are decoded locally.
    pub fn on_hid_packet<P: Publish, L: LinkSender>(
        &mut self,
        packet: &RawPacket,
        now_ms: u64,
        bus: &mut P,
        link: &mut L,
    ) {
        if self.role == Role::Central {
            match relay::forward_packet(packet, link) {
                Ok(()) => {}
                Err(RelayError::LinkUnavailable) => debug!("split link unavailable, relay dropped"),
                Err(e) => warn!("relay rejected packet: {}", e),
            }
        }

        self.ingest(packet.as_bytes(), now_ms, bus);
    }

    /// Message from the other half
    pub fn on_split_message<P: Publish>(&mut self, msg: &SplitMessage, now_ms: u64, bus: &mut P) {
        if self.role == Role::Central {
            debug!("central ignores relayed packets");
            return;
        }

        if let Some(bytes) = relay::unwrap(msg) {
            self.ingest(bytes, now_ms, bus);
        }
    }

    /// Volume window timer fired
    pub fn on_volume_window<P: Publish>(&mut self, now_ms: u64, bus: &mut P) {
        if let Some(value) = self.debouncer.expire(now_ms) {
            bus.publish(Notification::Volume { value });
        }
    }

    /// Liveness timer fired
    pub fn on_liveness_deadline<P: Publish>(&mut self, now_ms: u64, bus: &mut P) {
        if let Some(value) = self.liveness.expire(now_ms) {
            bus.publish(Notification::Connected { value });
        }
    }

    /// Decode and publish packet bytes
    fn ingest<P: Publish>(&mut self, bytes: &[u8], now_ms: u64, bus: &mut P) {
        let Some(notification) = decode_with_text_offset(bytes, self.text_offset) else {
            return;
        };

        if let Some(value) = self.liveness.observe(now_ms) {
            bus.publish(Notification::Connected { value });
        }

        match notification {
            Notification::Volume { value } => {
                if let Some(value) = self.debouncer.receive(value, now_ms) {
                    bus.publish(Notification::Volume { value });
                }
            }
            other => bus.publish(other),
        }
    }

    /// When the volume window timer should next fire
    pub fn volume_deadline(&self) -> Option<u64> {
        self.debouncer.deadline()
    }

    /// When the liveness timer should next fire
    pub fn liveness_deadline(&self) -> Option<u64> {
        self.liveness.deadline()
    }

    pub fn is_connected(&self) -> bool {
        self.liveness.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{LinkUnavailable, NoLink};
    use heapless::Vec;

    #[derive(Default)]
    struct Published(Vec<Notification, 16>);

    impl Publish for Published {
        fn publish(&mut self, notification: Notification) {
            let _ = self.0.push(notification);
        }
    }

    impl Published {
        fn volumes(&self) -> Vec<u8, 16> {
            self.0
                .iter()
                .filter_map(|n| match n {
                    Notification::Volume { value } => Some(*value),
                    _ => None,
                })
                .collect()
        }

        fn connections(&self) -> Vec<bool, 16> {
            self.0
                .iter()
                .filter_map(|n| match n {
                    Notification::Connected { value } => Some(*value),
                    _ => None,
                })
                .collect()
        }
    }

    #[derive(Default)]
    struct Capture(Vec<SplitMessage, 8>);

    impl LinkSender for Capture {
        fn try_send(&mut self, msg: SplitMessage) -> Result<(), LinkUnavailable> {
            self.0.push(msg).map_err(|_| LinkUnavailable)
        }
    }

    fn central() -> NotifyEngine {
        NotifyEngine::new(&NotifyConfig::for_role(Role::Central))
    }

    fn peripheral() -> NotifyEngine {
        NotifyEngine::new(&NotifyConfig::for_role(Role::Peripheral))
    }

    #[test]
    fn test_time_published() {
        let mut engine = central();
        let mut bus = Published::default();
        engine.on_hid_report(&[0xAA, 13, 45], 0, &mut bus, &mut NoLink);

        assert_eq!(
            bus.0.as_slice(),
            &[
                Notification::Connected { value: true },
                Notification::Time {
                    hour: 13,
                    minute: 45
                },
            ]
        );
    }

    #[test]
    fn test_volume_burst() {
        let mut engine = central();
        let mut bus = Published::default();

        engine.on_hid_report(&[0xAB, 7], 0, &mut bus, &mut NoLink);
        engine.on_hid_report(&[0xAB, 9], 50, &mut bus, &mut NoLink);
        engine.on_hid_report(&[0xAB, 42], 100, &mut bus, &mut NoLink);
        assert_eq!(bus.volumes().as_slice(), &[7]);

        assert_eq!(engine.volume_deadline(), Some(200));
        engine.on_volume_window(200, &mut bus);
        assert_eq!(bus.volumes().as_slice(), &[7, 42]);
    }

    #[test]
    fn test_unknown_publishes_nothing() {
        let mut engine = central();
        let mut bus = Published::default();
        engine.on_hid_report(&[0xFF, 1, 2], 0, &mut bus, &mut NoLink);
        assert!(bus.0.is_empty());
        assert!(!engine.is_connected());
    }

    #[test]
    fn test_oversize_report_dropped() {
        let mut engine = central();
        let mut bus = Published::default();
        let mut link = Capture::default();
        engine.on_hid_report(&[0xAB; 40], 0, &mut bus, &mut link);
        assert!(bus.0.is_empty());
        assert!(link.0.is_empty());
    }

    #[test]
    fn test_liveness_cycle() {
        let mut engine = central();
        let mut bus = Published::default();

        engine.on_hid_report(&[0xAA, 1, 0], 0, &mut bus, &mut NoLink);
        engine.on_hid_report(&[0xAA, 1, 1], 1000, &mut bus, &mut NoLink);
        assert_eq!(engine.liveness_deadline(), Some(4000));

        engine.on_liveness_deadline(4000, &mut bus);
        engine.on_liveness_deadline(4500, &mut bus);
        assert_eq!(bus.connections().as_slice(), &[true, false]);

        engine.on_hid_report(&[0xAA, 1, 5], 9000, &mut bus, &mut NoLink);
        engine.on_hid_report(&[0xAA, 1, 6], 9100, &mut bus, &mut NoLink);
        assert_eq!(bus.connections().as_slice(), &[true, false, true]);
    }

    #[test]
    fn test_short_packet_does_not_keep_alive() {
        let mut engine = central();
        let mut bus = Published::default();
        engine.on_hid_report(&[0xAA, 1], 0, &mut bus, &mut NoLink);
        assert!(!engine.is_connected());
    }

    #[test]
    fn test_central_relays_everything() {
        let mut engine = central();
        let mut bus = Published::default();
        let mut link = Capture::default();

        engine.on_hid_report(&[0xAB, 3], 0, &mut bus, &mut link);
        engine.on_hid_report(&[0xFF], 1, &mut bus, &mut link);

        assert_eq!(link.0.len(), 2);
        assert_eq!(
            link.0[1],
            SplitMessage::raw_hid(&[0xFF]).unwrap()
        );
    }

    #[test]
    fn test_link_down_still_decodes() {
        let mut engine = central();
        let mut bus = Published::default();
        engine.on_hid_report(&[0xAB, 3], 0, &mut bus, &mut NoLink);
        assert_eq!(bus.volumes().as_slice(), &[3]);
    }

    #[test]
    fn test_peripheral_unwraps_relay() {
        let mut central = central();
        let mut peripheral = peripheral();
        let mut link = Capture::default();
        let mut central_bus = Published::default();
        let mut peripheral_bus = Published::default();

        central.on_hid_report(&[0xAA, 21, 7], 0, &mut central_bus, &mut link);
        for msg in link.0.iter() {
            peripheral.on_split_message(msg, 5, &mut peripheral_bus);
        }

        assert_eq!(central_bus.0, peripheral_bus.0);
    }

    #[test]
    fn test_peripheral_does_not_relay() {
        let mut engine = peripheral();
        let mut bus = Published::default();
        let mut link = Capture::default();
        engine.on_hid_report(&[0xAB, 3], 0, &mut bus, &mut link);
        assert!(link.0.is_empty());
        assert_eq!(bus.volumes().as_slice(), &[3]);
    }

    #[test]
    fn test_central_ignores_split_messages() {
        let mut engine = central();
        let mut bus = Published::default();
        let msg = SplitMessage::raw_hid(&[0xAB, 3]).unwrap();
        engine.on_split_message(&msg, 0, &mut bus);
        assert!(bus.0.is_empty());
    }

    #[test]
    fn test_handle_dispatch() {
        let mut engine = peripheral();
        let mut bus = Published::default();

        let msg = SplitMessage::raw_hid(&[0xAB, 10]).unwrap();
        engine.handle(&WorkItem::Split(msg), 0, &mut bus, &mut NoLink);
        let msg = SplitMessage::raw_hid(&[0xAB, 20]).unwrap();
        engine.handle(&WorkItem::Split(msg), 10, &mut bus, &mut NoLink);
        engine.handle(&WorkItem::VolumeWindowElapsed, 200, &mut bus, &mut NoLink);
        engine.handle(&WorkItem::LivenessDeadline, 3010, &mut bus, &mut NoLink);

        assert_eq!(bus.volumes().as_slice(), &[10, 20]);
        assert_eq!(bus.connections().as_slice(), &[true, false]);
    }

    #[test]
    fn test_stale_timers_are_harmless() {
        let mut engine = central();
        let mut bus = Published::default();
        engine.on_volume_window(1_000, &mut bus);
        engine.on_liveness_deadline(1_000, &mut bus);
        assert!(bus.0.is_empty());
    }
}
