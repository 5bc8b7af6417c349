//! Build script for hidview-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Layout names the firmware can hold, and their maximum length
const MAX_LAYOUTS: usize = 8;
const MAX_LAYOUT_LABEL_LEN: usize = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "display.toml not found or unreadable",
            &[format!("{}", e)],
        ),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in display.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_split(&config, &mut errors);
    validate_notify(&config, &mut errors);
    validate_layout(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in display.toml", &errors);
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// [split] role must name one of the two halves
fn validate_split(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(split) = config.get("split") else {
        errors.push("Missing [split] section - role is required".to_string());
        return;
    };

    match split.get("role") {
        Some(toml::Value::String(role)) if role == "central" || role == "peripheral" => {}
        Some(_) => errors.push("[split] role must be 'central' or 'peripheral'".to_string()),
        None => errors.push("[split] missing 'role'".to_string()),
    }
}

/// [notify] timings are optional but must be in range when present
fn validate_notify(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(notify) = config.get("notify") else {
        return;
    };

    for key in ["volume_window_ms", "liveness_timeout_ms"] {
        match notify.get(key) {
            Some(toml::Value::Integer(ms)) if *ms > 0 && *ms <= u32::MAX as i64 => {}
            Some(_) => errors.push(format!("[notify] {} must be a positive integer", key)),
            None => {}
        }
    }

    match notify.get("media_text_offset") {
        Some(toml::Value::Integer(1 | 2)) | None => {}
        Some(_) => errors.push("[notify] media_text_offset must be 1 or 2".to_string()),
    }
}

/// [layout] names must be a short list of short strings
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(names) = config.get("layout").and_then(|l| l.get("names")) else {
        return;
    };

    let Some(names) = names.as_array() else {
        errors.push("[layout] names must be an array of strings".to_string());
        return;
    };

    if names.len() > MAX_LAYOUTS {
        errors.push(format!("[layout] at most {} names are supported", MAX_LAYOUTS));
    }

    for (i, name) in names.iter().enumerate() {
        match name.as_str() {
            Some(s) if s.contains(',') || s.contains('"') => {
                errors.push(format!("[layout] name {} must not contain ',' or '\"'", i))
            }
            Some(s) if s.len() > MAX_LAYOUT_LABEL_LEN => println!(
                "cargo:warning=[layout] name '{}' will be cut to {} bytes",
                s, MAX_LAYOUT_LABEL_LEN
            ),
            Some(_) => {}
            None => errors.push(format!("[layout] name {} must be a string", i)),
        }
    }
}
