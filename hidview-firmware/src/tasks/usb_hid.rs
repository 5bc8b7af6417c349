//! USB raw HID ingress (central only)

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidReader, ReadError};
use embassy_usb::UsbDevice;

use hidview_core::WorkItem;
use hidview_protocol::{RawPacket, MAX_PACKET_SIZE};

use crate::channels::WORK_QUEUE;

/// USB driver for this board
pub type UsbDriver = Driver<'static, USB>;

/// Runs the USB device state machine
#[embassy_executor::task]
pub async fn usb_device_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Queues every raw report from the host
#[embassy_executor::task]
pub async fn usb_hid_task(mut reader: HidReader<'static, UsbDriver, MAX_PACKET_SIZE>) {
    info!("USB HID task started");

    let mut buf = [0u8; MAX_PACKET_SIZE];

    loop {
        reader.ready().await;

        match reader.read(&mut buf).await {
            Ok(n) => match RawPacket::new(&buf[..n]) {
                Ok(packet) => WORK_QUEUE.send(WorkItem::HidReport(packet)).await,
                Err(e) => debug!("Dropping HID report: {}", e),
            },
            Err(ReadError::BufferOverflow) => warn!("Oversize HID report dropped"),
            Err(e) => warn!("HID read error: {:?}", e),
        }
    }
}
