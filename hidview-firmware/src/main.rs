//! hidview - split keyboard status display firmware
//!
//! The central half receives raw HID packets from the host companion
//! application, shows them, and mirrors them over the split UART. The
//! peripheral half shows what the central relays.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, USB};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidReaderWriter, HidSubclass, State as HidState,
};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hidview_core::config::{NotifyConfig, Role};
use hidview_protocol::MAX_PACKET_SIZE;

use crate::config::parse_config;
use crate::tasks::usb_hid::UsbDriver;

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

mod channels;
mod config;
mod display;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

/// Vendor-defined raw HID collection, 32-byte input and output reports
/// (usage page 0xFF60, usage 0x61)
const RAW_HID_REPORT_DESCRIPTOR: &[u8] = &[
    0x06, 0x60, 0xFF, // Usage Page (Vendor Defined 0xFF60)
    0x09, 0x61, //       Usage (0x61)
    0xA1, 0x01, //       Collection (Application)
    0x09, 0x62, //         Usage (0x62)
    0x15, 0x00, //         Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x20, //         Report Count (32)
    0x75, 0x08, //         Report Size (8)
    0x81, 0x02, //         Input (Data, Var, Abs)
    0x09, 0x63, //         Usage (0x63)
    0x15, 0x00, //         Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x20, //         Report Count (32)
    0x75, 0x08, //         Report Size (8)
    0x91, 0x02, //         Output (Data, Var, Abs)
    0xC0, //             End Collection
];

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// USB descriptor buffers and class state
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HID_STATE: StaticCell<HidState> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("hidview firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Role {}, volume window {} ms, liveness timeout {} ms",
        config.role, config.volume_window_ms, config.liveness_timeout_ms
    );

    // Split link UART: TX=GPIO0, RX=GPIO1 (115200 baud default)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for split link");

    match config.role {
        Role::Central => {
            let driver = Driver::new(p.USB, Irqs);
            let reader = init_usb(&spawner, driver);
            spawner.spawn(tasks::usb_hid_task(reader)).unwrap();
            spawner.spawn(tasks::split_tx_task(tx)).unwrap();
        }
        Role::Peripheral => {
            spawner.spawn(tasks::split_rx_task(rx)).unwrap();
        }
    }

    spawner.spawn(tasks::volume_timer_task()).unwrap();
    spawner.spawn(tasks::liveness_timer_task()).unwrap();
    spawner
        .spawn(tasks::screen_task(config.layouts.clone()))
        .unwrap();
    spawner.spawn(tasks::notify_task(config)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Build the USB device with one raw HID interface and start it
///
/// Returns the report reader for the ingress task.
fn init_usb(
    spawner: &Spawner,
    driver: UsbDriver,
) -> embassy_usb::class::hid::HidReader<'static, UsbDriver, MAX_PACKET_SIZE> {
    let mut usb_config = UsbConfig::new(0x1d50, 0x615e);
    usb_config.manufacturer = Some("hidview");
    usb_config.product = Some("hidview split display");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );

    let hid_config = HidConfig {
        report_descriptor: RAW_HID_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 10,
        max_packet_size: MAX_PACKET_SIZE as u16,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };
    let hid = HidReaderWriter::<_, MAX_PACKET_SIZE, MAX_PACKET_SIZE>::new(
        &mut builder,
        HID_STATE.init(HidState::new()),
        hid_config,
    );

    spawner.spawn(tasks::usb_device_task(builder.build())).unwrap();

    // Nothing is written back to the host
    let (reader, _writer) = hid.split();
    reader
}

/// Parse the embedded configuration, falling back to defaults
///
/// The build script validates display.toml, so the fallback only covers
/// values that are well-formed TOML but out of range.
fn load_config() -> NotifyConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            NotifyConfig::default()
        }
    }
}
