//! Timer-driven state
//!
//! Both machines here are pure: callers pass the current time in
//! milliseconds and arm a one-shot timer for the returned deadline. A timer
//! that fires late, or after its deadline was moved, is harmless.

pub mod debounce;
pub mod liveness;

pub use debounce::VolumeDebouncer;
pub use liveness::{LinkState, LivenessMonitor};
