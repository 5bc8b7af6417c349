//! Screen task
//!
//! Redraws the status widget from the latest snapshot. Snapshots that
//! arrive while a redraw is pending are collapsed by the signal.

use defmt::*;
use heapless::{String, Vec};

use hidview_core::config::{MAX_LAYOUTS, MAX_LAYOUT_LABEL_LEN};

use crate::channels::SCREEN_UPDATE;
use crate::display::render;

#[embassy_executor::task]
pub async fn screen_task(layouts: Vec<String<MAX_LAYOUT_LABEL_LEN>, MAX_LAYOUTS>) {
    info!("Screen task started");

    loop {
        let state = SCREEN_UPDATE.wait().await;
        let lines = render(&state, &layouts);

        info!(
            "[{=str}] [{=str}] [{=str}] [{=str}]",
            lines.header.as_str(),
            lines.controls.as_str(),
            lines.track.as_str(),
            lines.artist.as_str()
        );
    }
}
