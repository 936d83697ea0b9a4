//! Serialization helpers with validation.
//!
//! JSON is the primary format; the hex form is Base16-encoded JSON for
//! pasting parameter sets into text channels.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Deserializes data from a JSON string. Blank input is a validation error.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

pub fn to_hex<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    let json = to_json(data)?;
    Ok(hex::encode(json.as_bytes()))
}

pub fn from_hex<T>(hex_str: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if hex_str.trim().is_empty() {
        return Err(IoError::validation("Empty hex string"));
    }

    let bytes = hex::decode(hex_str.trim())
        .map_err(|e| IoError::validation(format!("Invalid hex encoding: {}", e)))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| IoError::validation(format!("Invalid UTF-8 in hex: {}", e)))?;

    from_json(&json)
}

pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json = to_json_pretty(data)?;
    std::fs::write(&path, json).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing JSON to {:?}", path.as_ref()))
    })?;
    Ok(())
}

pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let json = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading JSON from {:?}", path.as_ref()))
    })?;
    from_json(&json)
}
