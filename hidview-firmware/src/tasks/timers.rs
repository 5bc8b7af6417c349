//! Deadline timers
//!
//! A timer never touches notification state. When its deadline passes it
//! queues a work item; a new deadline arriving first restarts the wait.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};

use hidview_core::WorkItem;

use crate::channels::{LIVENESS_DEADLINE, VOLUME_DEADLINE, WORK_QUEUE};

#[embassy_executor::task]
pub async fn volume_timer_task() {
    run_deadline_timer(&VOLUME_DEADLINE, WorkItem::VolumeWindowElapsed).await
}

#[embassy_executor::task]
pub async fn liveness_timer_task() {
    run_deadline_timer(&LIVENESS_DEADLINE, WorkItem::LivenessDeadline).await
}

async fn run_deadline_timer(
    deadline: &'static Signal<CriticalSectionRawMutex, Option<u64>>,
    item: WorkItem,
) -> ! {
    let mut armed = None;

    loop {
        let Some(at) = armed else {
            armed = deadline.wait().await;
            continue;
        };

        match select(Timer::at(Instant::from_millis(at)), deadline.wait()).await {
            Either::First(()) => {
                armed = None;
                WORK_QUEUE.send(item.clone()).await;
            }
            Either::Second(next) => armed = next,
        }
    }
}
