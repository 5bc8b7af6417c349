//! Split UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use hidview_protocol::{link, MAX_LINK_FRAME_SIZE};

use crate::channels::LINK_OUT;

/// Frames queued split messages onto the UART
#[embassy_executor::task]
pub async fn split_tx_task(mut tx: BufferedUartTx) {
    info!("Split TX task started");

    let mut buf = [0u8; MAX_LINK_FRAME_SIZE];

    loop {
        let msg = LINK_OUT.receive().await;

        let len = match link::encode(&msg, &mut buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("Failed to frame split message: {}", e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send split frame: {:?}", e);
        }
    }
}
