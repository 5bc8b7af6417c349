//! Configuration loading
//!
//! The configuration is compiled in from `display.toml` and parsed with a
//! small no_std reader.

pub mod toml;

pub use toml::{parse_config, ParseError};
