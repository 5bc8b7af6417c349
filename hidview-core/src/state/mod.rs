//! Display status model
//!
//! The cached state a renderer reads after each publish. Drawing itself
//! happens elsewhere.

pub mod status;

pub use status::{StatusState, NO_MEDIA_LABEL};
