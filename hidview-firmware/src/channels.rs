//! Inter-task communication channels
//!
//! Ingress tasks and timers feed one work queue; the notify task is the
//! only consumer and the only owner of notification state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use hidview_core::{StatusState, WorkItem};
use hidview_protocol::SplitMessage;

/// Work queue capacity
const WORK_QUEUE_SIZE: usize = 16;

/// Outbound split link capacity
const LINK_QUEUE_SIZE: usize = 4;

/// All work for the notify task: host reports, relayed packets, timer fires
pub static WORK_QUEUE: Channel<CriticalSectionRawMutex, WorkItem, WORK_QUEUE_SIZE> =
    Channel::new();

/// Messages waiting to go out on the split UART
pub static LINK_OUT: Channel<CriticalSectionRawMutex, SplitMessage, LINK_QUEUE_SIZE> =
    Channel::new();

/// Volume window deadline in ms since boot, None to disarm
pub static VOLUME_DEADLINE: Signal<CriticalSectionRawMutex, Option<u64>> = Signal::new();

/// Liveness deadline in ms since boot, None to disarm
pub static LIVENESS_DEADLINE: Signal<CriticalSectionRawMutex, Option<u64>> = Signal::new();

/// Latest status snapshot for the screen
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, StatusState> = Signal::new();
