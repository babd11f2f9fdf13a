//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot check on its own.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Validate that a file path exists and is a regular file
pub fn validate_existing_file(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("File does not exist: '{path_str}'"));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: '{path_str}'"));
    }

    Ok(path)
}

/// Validate that a configuration file is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = validate_existing_file(path_str)
        .map_err(|e| format!("Invalid configuration file: {e}"))?;

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{path_str}': {e}"
        )),
    }
}

/// Parse a `key=value` request parameter
///
/// Objects, arrays, `null` and quoted JSON strings are decoded
/// (`body={"a":1}`). Everything else, numbers and booleans included, is kept
/// as the literal text (`topic=2024`, `topic=ci.results`).
pub fn parse_param(param: &str) -> Result<(String, Value), String> {
    let (key, raw) = param
        .split_once('=')
        .ok_or_else(|| format!("Parameter must be KEY=VALUE, got: '{param}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Parameter key cannot be empty: '{param}'"));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(decoded @ (Value::Object(_) | Value::Array(_) | Value::Null | Value::String(_))) => decoded,
        _ => Value::String(raw.to_string()),
    };

    Ok((key.to_string(), value))
}

/// Parse a JSON argument
pub fn parse_json_value(json: &str) -> Result<Value, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))
}
