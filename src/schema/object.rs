//! Fixed-shape objects and homogeneous records.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::context::Context;
use crate::error::{Issue, Issues};

use super::{Schema, SchemaKind};

pub(crate) fn object(fields: IndexMap<String, Schema>) -> Schema {
    Schema::leaf("object", SchemaKind::Object(fields))
}

pub(crate) fn record(key: Schema, value: Schema) -> Schema {
    let name = format!("record<{}, {}>", key.name, value.name);
    Schema::leaf(
        name,
        SchemaKind::Record {
            key: Box::new(key),
            value: Box::new(value),
        },
    )
}

/// Walks every declared key even after earlier keys have failed, so one
/// parse reports every defective field. Unknown input keys are dropped
/// from the output without comment.
pub(crate) fn check_object(
    schema: &Schema,
    fields: &IndexMap<String, Schema>,
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let input = match value.as_object() {
        Some(o) => o,
        None => return schema.mismatch(value, ctx),
    };

    let mut issues: Vec<Issue> = Vec::new();
    let mut out = Map::new();

    for (key, field_schema) in fields {
        let child = ctx.enter_key(key);
        match input.get(key) {
            Some(field_value) => match field_schema.check(field_value, &child) {
                Validation::Success(v) => {
                    out.insert(key.clone(), v);
                }
                Validation::Failure(found) => issues.extend(found),
            },
            None => match field_schema.absent_default() {
                Some(default) => {
                    // an optional field with a null default stays omitted
                    if !default.is_null() {
                        out.insert(key.clone(), default);
                    }
                }
                None => {
                    issues.push(Issue::mismatch(
                        child.path().clone(),
                        field_schema.name(),
                        &Value::Null,
                    ));
                }
            },
        }
    }

    if issues.is_empty() {
        Validation::Success(Value::Object(out))
    } else {
        Validation::Failure(Issues::from_vec(issues))
    }
}

/// Validates every input entry: key and value independently, both issues
/// kept when both are defective. An entry reaches the output only when
/// both halves succeed.
pub(crate) fn check_record(
    schema: &Schema,
    key_schema: &Schema,
    value_schema: &Schema,
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let input = match value.as_object() {
        Some(o) => o,
        None => return schema.mismatch(value, ctx),
    };

    let mut issues: Vec<Issue> = Vec::new();
    let mut out = Map::new();

    for (key, entry_value) in input {
        let child = ctx.enter_key(key);

        let key_out = match key_schema.check(&Value::String(key.clone()), &child) {
            Validation::Success(v) => Some(v),
            Validation::Failure(found) => {
                issues.extend(found);
                None
            }
        };
        let value_out = match value_schema.check(entry_value, &child) {
            Validation::Success(v) => Some(v),
            Validation::Failure(found) => {
                issues.extend(found);
                None
            }
        };

        if let (Some(k), Some(v)) = (key_out, value_out) {
            // a key schema may coerce; fall back to the input key when the
            // coerced form is not a string
            let out_key = match k {
                Value::String(s) => s,
                _ => key.clone(),
            };
            out.insert(out_key, v);
        }
    }

    if issues.is_empty() {
        Validation::Success(Value::Object(out))
    } else {
        Validation::Failure(Issues::from_vec(issues))
    }
}
