//! Typed reads of loosely typed JSON fields.
//!
//! `Null` always means "missing" and never fails. Values of the wrong shape
//! fail with [`EngineError::InvalidField`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

use super::{canonical, split_list};
use crate::error::{EngineError, Result};

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(field: &str, expected: &str, value: &Value) -> EngineError {
    EngineError::invalid_field(field, format!("expected {}, got {}", expected, kind(value)))
}

/// Identifier: string or number
pub fn identifier(value: &Value, field: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(unexpected(field, "a string or number", other)),
    }
}

/// Display text: trimmed and NFC-composed, case preserved
pub fn display_text(value: &Value, field: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let text: String = s.trim().nfc().collect();
            Ok((!text.is_empty()).then_some(text))
        }
        other => Err(unexpected(field, "a string", other)),
    }
}

/// Matching text: canonical lowercase form
pub fn text(value: &Value, field: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let text = canonical(s);
            Ok((!text.is_empty()).then_some(text))
        }
        other => Err(unexpected(field, "a string", other)),
    }
}

/// Set of canonical items from a comma-separated string or an array of strings
pub fn list(value: &Value, field: &str) -> Result<BTreeSet<String>> {
    match value {
        Value::Null => Ok(BTreeSet::new()),
        Value::String(s) => Ok(split_list(s).collect()),
        Value::Array(items) => {
            let mut set = BTreeSet::new();
            for item in items {
                match item {
                    Value::String(s) => set.extend(split_list(s)),
                    Value::Null => {}
                    other => return Err(unexpected(field, "an array of strings", other)),
                }
            }
            Ok(set)
        }
        other => Err(unexpected(field, "a string or array of strings", other)),
    }
}

/// Finite number from a JSON number or a numeric string (`"8000"`, `"8000,5"`)
pub fn number(value: &Value, field: &str) -> Result<Option<f64>> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Some(trimmed.replace(',', ".").parse::<f64>().map_err(|_| {
                EngineError::invalid_field(field, format!("'{}' is not a number", trimmed))
            })?)
        }
        other => return Err(unexpected(field, "a number", other)),
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(EngineError::invalid_field(field, "number is not finite")),
    }
}

/// Timestamp from RFC 3339, a naive ISO datetime (assumed UTC), a plain date,
/// or integer Unix seconds
pub fn timestamp(value: &Value, field: &str) -> Result<Option<DateTime<Utc>>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
                return Ok(Some(dt.with_timezone(&Utc)));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
                return Ok(Some(naive.and_utc()));
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return Ok(date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()));
            }
            Err(EngineError::invalid_field(
                field,
                format!("'{}' is not a recognised date", trimmed),
            ))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(Some)
            .ok_or_else(|| EngineError::invalid_field(field, "timestamp out of range")),
        other => Err(unexpected(field, "a date string", other)),
    }
}
