//! Split UART receive task
//!
//! Reassembles link frames from the other half and queues the messages.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use hidview_core::WorkItem;
use hidview_protocol::LinkParser;

use crate::channels::WORK_QUEUE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn split_rx_task(mut rx: BufferedUartRx) {
    info!("Split RX task started");

    let mut parser = LinkParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(msg)) => WORK_QUEUE.send(WorkItem::Split(msg)).await,
                        Ok(None) => {}
                        Err(e) => warn!("Split frame error: {}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
