//! Minimal TOML reader for the display configuration
//!
//! Handles only the subset `display.toml` uses:
//! - `[section]` headers
//! - `key = value` pairs (string, integer)
//! - One-line string arrays: `names = ["EN", "RU"]`
//! - Comments (`# ...`)
//!
//! Unknown keys are skipped so older firmware accepts newer files.

use hidview_core::config::{ConfigError, NotifyConfig, Role};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// More layout names than the config can hold
    TooManyItems,
    /// Parsed, but the values do not validate
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Split,
    Notify,
    Layout,
}

/// Parse `display.toml` into a validated [`NotifyConfig`]
///
/// Keys that are absent keep their defaults. A `names` array replaces the
/// default layout list.
pub fn parse_config(input: &str) -> Result<NotifyConfig, ParseError> {
    let mut config = NotifyConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "split" => Ok(Section::Split),
        "notify" => Ok(Section::Notify),
        "layout" => Ok(Section::Layout),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split "key = value", dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let mut value = line[eq_pos + 1..].trim();

    if let Some(hash_pos) = value.find('#') {
        if value[..hash_pos].matches('"').count() % 2 == 0 {
            value = value[..hash_pos].trim();
        }
    }

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_role(value: &str) -> Result<Role, ParseError> {
    match parse_string(value) {
        "central" => Ok(Role::Central),
        "peripheral" => Ok(Role::Peripheral),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse `["EN", "RU"]` into the layout list
fn parse_names(value: &str, config: &mut NotifyConfig) -> Result<(), ParseError> {
    if !value.starts_with('[') || !value.ends_with(']') {
        return Err(ParseError::InvalidValue);
    }

    config.layouts.clear();
    for item in value[1..value.len() - 1].split(',') {
        let name = parse_string(item);
        if name.is_empty() {
            continue;
        }
        if !config.push_layout(name) {
            return Err(ParseError::TooManyItems);
        }
    }

    Ok(())
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut NotifyConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Split, "role") => config.role = parse_role(value)?,
        (Section::Notify, "volume_window_ms") => config.volume_window_ms = parse_int(value)?,
        (Section::Notify, "liveness_timeout_ms") => config.liveness_timeout_ms = parse_int(value)?,
        (Section::Notify, "media_text_offset") => config.media_text_offset = parse_int(value)?,
        (Section::Layout, "names") => parse_names(value, config)?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[split]
role = "peripheral"

[notify]
volume_window_ms = 150 # faster
liveness_timeout_ms = 5000
media_text_offset = 1

[layout]
names = ["EN", "DE", "UA"]
"#,
        )
        .unwrap();

        assert_eq!(config.role, Role::Peripheral);
        assert_eq!(config.volume_window_ms, 150);
        assert_eq!(config.liveness_timeout_ms, 5000);
        assert_eq!(config.media_text_offset, 1);
        assert_eq!(config.layout_name(2), Some("UA"));
    }

    #[test]
    fn test_defaults_when_empty() {
        assert_eq!(parse_config("# nothing\n").unwrap(), NotifyConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            parse_config("[split]\nrole = \"left\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[keymap]\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[notify]\nmedia_text_offset = 5\n"),
            Err(ParseError::Invalid(ConfigError::InvalidTextOffset(5)))
        );
    }
}
