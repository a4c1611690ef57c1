//! Primitive leaf schemas.
//!
//! Each primitive is a guard- or constructor-backed leaf: success returns
//! the input (possibly coerced), failure records exactly one issue named
//! after the primitive. Coercions that would "throw" (an unparseable
//! bigint string, an invalid calendar date) surface as the same single
//! type-mismatch issue rather than an escaping error.

use std::sync::Arc;

use serde_json::Value;

use crate::limits;

use super::refine::SizeBounds;
use super::{Schema, SchemaKind};

pub(crate) fn string() -> Schema {
    let max = limits::defaults().string;
    Schema::leaf(
        "string",
        SchemaKind::Construct(Arc::new(|v: &Value| {
            v.as_str().map(|s| Value::String(s.trim().to_string()))
        })),
    )
    .size(SizeBounds::at_most(max))
}

pub(crate) fn untrimmed_string() -> Schema {
    let max = limits::defaults().string;
    Schema::leaf(
        "string",
        SchemaKind::Guard(Arc::new(|v: &Value| v.is_string())),
    )
    .size(SizeBounds::at_most(max))
}

pub(crate) fn number() -> Schema {
    Schema::leaf(
        "number",
        SchemaKind::Guard(Arc::new(|v: &Value| v.is_number())),
    )
}

pub(crate) fn unsafe_number() -> Schema {
    Schema::leaf(
        "unsafe_number",
        SchemaKind::Guard(Arc::new(|v: &Value| {
            v.is_number()
                || matches!(v.as_str(), Some("NaN" | "Infinity" | "-Infinity"))
        })),
    )
}

pub(crate) fn integer() -> Schema {
    Schema::leaf(
        "integer",
        SchemaKind::Guard(Arc::new(|v: &Value| v.as_i64().is_some())),
    )
}

pub(crate) fn unsafe_integer() -> Schema {
    Schema::leaf(
        "unsafe_integer",
        SchemaKind::Guard(Arc::new(|v: &Value| match v {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0)
            }
            _ => false,
        })),
    )
}

pub(crate) fn boolean() -> Schema {
    Schema::leaf(
        "boolean",
        SchemaKind::Guard(Arc::new(|v: &Value| v.is_boolean())),
    )
}

pub(crate) fn big_int() -> Schema {
    Schema::leaf("bigint", SchemaKind::Construct(Arc::new(coerce_big_int)))
}

fn coerce_big_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Value::String(i.to_string()))
            } else {
                // u64 beyond i64::MAX is still integral; floats are not
                n.as_u64().map(|u| Value::String(u.to_string()))
            }
        }
        Value::String(s) => canonical_decimal(s.trim()).map(Value::String),
        Value::Bool(b) => Some(Value::String(if *b { "1" } else { "0" }.to_string())),
        _ => None,
    }
}

/// Canonical decimal form of an integer string of any magnitude: optional
/// sign, leading zeros stripped, `-0` collapsed to `0`.
fn canonical_decimal(s: &str) -> Option<String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some("0".to_string());
    }
    if negative {
        Some(format!("-{}", significant))
    } else {
        Some(significant.to_string())
    }
}

pub(crate) fn date() -> Schema {
    Schema::leaf("date", SchemaKind::Construct(Arc::new(coerce_date)))
}

fn coerce_date(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                return Some(Value::String(dt.to_rfc3339()));
            }
            let d = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            let dt = d.and_hms_opt(0, 0, 0)?.and_utc();
            Some(Value::String(dt.to_rfc3339()))
        }
        Value::Number(n) => {
            let dt = chrono::DateTime::from_timestamp_millis(n.as_i64()?)?;
            Some(Value::String(dt.to_rfc3339()))
        }
        _ => None,
    }
}

pub(crate) fn literal(members: Vec<Value>) -> Schema {
    let name = format!(
        "literal({})",
        members.iter().map(label).collect::<Vec<_>>().join(", ")
    );
    Schema::leaf(name, SchemaKind::Literal(members))
}

pub(crate) fn enumeration(members: Vec<Value>) -> Schema {
    let mut schema = literal(members);
    schema.name = "enum".to_string();
    schema
}

/// Compact rendering of a value for schema names.
pub(crate) fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
