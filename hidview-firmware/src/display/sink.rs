//! Bus subscriber that publishes status snapshots

use hidview_core::{StatusState, Subscriber};
use hidview_protocol::Notification;

use crate::channels::SCREEN_UPDATE;

/// Keeps the status model and signals the screen after each change
pub struct ScreenSink {
    state: StatusState,
}

impl ScreenSink {
    pub fn new() -> Self {
        Self {
            state: StatusState::new(),
        }
    }
}

impl Subscriber for ScreenSink {
    fn on_notification(&mut self, notification: &Notification) {
        self.state.apply(notification);

        if self.state.is_dirty() {
            SCREEN_UPDATE.signal(self.state.clone());
            self.state.mark_clean();
        }
    }
}
