//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod notify;
pub mod screen;
pub mod split_rx;
pub mod split_tx;
pub mod timers;
pub mod usb_hid;

pub use notify::notify_task;
pub use screen::screen_task;
pub use split_rx::split_rx_task;
pub use split_tx::split_tx_task;
pub use timers::{liveness_timer_task, volume_timer_task};
pub use usb_hid::{usb_device_task, usb_hid_task};
