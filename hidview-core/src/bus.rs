//! Notification bus
//!
//! Explicitly owned publish/subscribe point. The owner of the display
//! subsystem registers subscriber handles at construction; there is no
//! global registry. Delivery is synchronous and in registration order.

use heapless::Vec;

use hidview_protocol::Notification;

/// Notification category used for subscription filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Topic {
    Time = 0,
    Volume = 1,
    Layout = 2,
    MediaTitle = 3,
    MediaArtist = 4,
    Connected = 5,
}

impl Topic {
    /// Topic a notification is published under
    pub fn of(notification: &Notification) -> Self {
        match notification {
            Notification::Time { .. } => Topic::Time,
            Notification::Volume { .. } => Topic::Volume,
            #[cfg(feature = "layout")]
            Notification::Layout { .. } => Topic::Layout,
            #[cfg(feature = "media")]
            Notification::MediaTitle { .. } => Topic::MediaTitle,
            #[cfg(feature = "media")]
            Notification::MediaArtist { .. } => Topic::MediaArtist,
            Notification::Connected { .. } => Topic::Connected,
            #[allow(unreachable_patterns)]
            _ => Topic::Connected,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of topics a subscriber listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TopicSet(u8);

impl TopicSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b0011_1111)
    }

    /// Add a topic
    pub fn with(self, topic: Topic) -> Self {
        Self(self.0 | topic.bit())
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.0 & topic.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<Topic> for TopicSet {
    fn from(topic: Topic) -> Self {
        TopicSet::empty().with(topic)
    }
}

/// Receiver of published notifications
pub trait Subscriber {
    fn on_notification(&mut self, notification: &Notification);
}

/// Anything notifications can be published to
///
/// The engine publishes through this seam so tests can record output
/// without a bus.
pub trait Publish {
    fn publish(&mut self, notification: Notification);
}

/// Errors from subscriber registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// All subscriber slots are taken
    Full,
}

/// Fixed-capacity bus over borrowed subscribers
pub struct NotificationBus<'a, const N: usize> {
    subscribers: Vec<(TopicSet, &'a mut dyn Subscriber), N>,
}

impl<'a, const N: usize> Default for NotificationBus<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> NotificationBus<'a, N> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber for a set of topics
    pub fn subscribe(
        &mut self,
        topics: impl Into<TopicSet>,
        subscriber: &'a mut dyn Subscriber,
    ) -> Result<(), BusError> {
        self.subscribers
            .push((topics.into(), subscriber))
            .map_err(|_| BusError::Full)
    }

    /// Deliver a notification to every interested subscriber
    ///
    /// Returns how many subscribers received it. A notification nobody
    /// listens to is dropped.
    pub fn dispatch(&mut self, notification: &Notification) -> usize {
        let topic = Topic::of(notification);
        let mut delivered = 0;

        for (topics, subscriber) in self.subscribers.iter_mut() {
            if topics.contains(topic) {
                subscriber.on_notification(notification);
                delivered += 1;
            }
        }

        if delivered == 0 {
            trace!("no subscriber for {}", topic);
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<'a, const N: usize> Publish for NotificationBus<'a, N> {
    fn publish(&mut self, notification: Notification) {
        self.dispatch(&notification);
    }
}
