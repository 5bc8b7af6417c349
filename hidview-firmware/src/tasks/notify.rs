//! Notify task
//!
//! Sole owner of the engine and the bus. Drains the work queue, runs each
//! item to completion, then re-arms the deadline timers.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;

use hidview_core::{NotificationBus, NotifyConfig, NotifyEngine, Subscriber, TopicSet, WorkItem};
use hidview_protocol::Notification;

use crate::channels::{LIVENESS_DEADLINE, VOLUME_DEADLINE, WORK_QUEUE};
use crate::display::ScreenSink;
use crate::link::ChannelLink;

/// Number of bus subscribers (screen, log)
const SUBSCRIBERS: usize = 2;

/// Prints every published notification
struct LogSubscriber;

impl Subscriber for LogSubscriber {
    fn on_notification(&mut self, notification: &Notification) {
        debug!("notification: {}", notification);
    }
}

/// Last deadline handed to a timer task
struct Armed {
    signal: &'static Signal<CriticalSectionRawMutex, Option<u64>>,
    deadline: Option<u64>,
}

impl Armed {
    const fn new(signal: &'static Signal<CriticalSectionRawMutex, Option<u64>>) -> Self {
        Self {
            signal,
            deadline: None,
        }
    }

    fn update(&mut self, deadline: Option<u64>) {
        if self.deadline != deadline {
            self.deadline = deadline;
            self.signal.signal(deadline);
        }
    }

    /// The timer consumed its deadline
    fn fired(&mut self) {
        self.deadline = None;
    }
}

#[embassy_executor::task]
pub async fn notify_task(config: NotifyConfig) {
    info!("Notify task started as {}", config.role);

    let mut engine = NotifyEngine::new(&config);
    let mut screen = ScreenSink::new();
    let mut log = LogSubscriber;
    let mut link = ChannelLink;

    let mut bus: NotificationBus<'_, SUBSCRIBERS> = NotificationBus::new();
    if bus.subscribe(TopicSet::all(), &mut screen).is_err()
        || bus.subscribe(TopicSet::all(), &mut log).is_err()
    {
        error!("Notification bus full");
    }

    let mut volume = Armed::new(&VOLUME_DEADLINE);
    let mut liveness = Armed::new(&LIVENESS_DEADLINE);

    loop {
        let item = WORK_QUEUE.receive().await;
        let now_ms = Instant::now().as_millis();

        match item {
            WorkItem::VolumeWindowElapsed => volume.fired(),
            WorkItem::LivenessDeadline => liveness.fired(),
            _ => {}
        }

        engine.handle(&item, now_ms, &mut bus, &mut link);

        volume.update(engine.volume_deadline());
        liveness.update(engine.liveness_deadline());
    }
}
