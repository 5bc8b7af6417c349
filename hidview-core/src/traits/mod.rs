//! Transport abstraction traits
//!
//! These traits define the interface between the notification logic and
//! board-specific transports.

pub mod link;

pub use link::{LinkSender, LinkUnavailable, NoLink};
