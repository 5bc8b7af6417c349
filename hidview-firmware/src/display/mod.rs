//! Status screen
//!
//! The notify task feeds [`ScreenSink`] from the bus; the screen task turns
//! each snapshot into text lines for the panel.

pub mod renderer;
pub mod sink;

pub use renderer::{render, StatusLines};
pub use sink::ScreenSink;
