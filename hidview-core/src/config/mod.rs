//! Configuration types
//!
//! Board-agnostic notification settings. The firmware fills these from its
//! embedded TOML file; tests build them directly.

pub mod types;

pub use types::*;
