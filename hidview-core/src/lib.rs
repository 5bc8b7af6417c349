//! Board-agnostic notification logic for the split keyboard display
//!
//! Everything here runs on the host as well as on the target:
//!
//! - Volume debouncing and connection liveness as pure timed state machines
//! - Central to peripheral relay of raw host packets
//! - The notification bus and the display status model
//! - The per-board engine that wires them together
//! - Configuration types
//!
//! Time is passed in as milliseconds; nothing in this crate reads a clock.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod config;
pub mod engine;
pub mod relay;
pub mod state;
pub mod timing;
pub mod traits;

pub use bus::{BusError, NotificationBus, Publish, Subscriber, Topic, TopicSet};
pub use config::{NotifyConfig, Role};
pub use engine::{NotifyEngine, WorkItem};
pub use state::StatusState;
