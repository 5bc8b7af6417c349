//! hidview raw HID notification protocol
//!
//! This crate defines the byte-level contract between the host companion
//! application and the keyboard display, plus the message carried across the
//! split link between the two halves.
//!
//! # Packet Overview
//!
//! Every raw HID report is a packet of at most 32 bytes whose first byte is a
//! discriminant:
//! ```text
//! ┌──────┬──────────────────────────────────────────────┐
//! │ 0xAA │ hour, minute                                 │
//! │ 0xAB │ volume                                       │
//! │ 0xAC │ layout index                                 │
//! │ 0xAD │ reserved, artist text (up to 31 bytes)       │
//! │ 0xAE │ reserved, title text (up to 31 bytes)        │
//! └──────┴──────────────────────────────────────────────┘
//! ```
//!
//! Unknown discriminants are ignored so the companion application can grow
//! the protocol without breaking older firmware.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod decode;
pub mod link;
pub mod notification;
pub mod packet;
pub mod split;

pub use decode::{decode, decode_with_text_offset, MEDIA_TEXT_OFFSET};
pub use link::{LinkError, LinkParser, LINK_START, MAX_LINK_FRAME_SIZE};
pub use notification::{MediaText, Notification, MEDIA_TEXT_CAPACITY};
pub use packet::{Discriminant, PacketError, RawPacket, MAX_PACKET_SIZE};
pub use split::{SplitMessage, SPLIT_PAYLOAD_SIZE};
