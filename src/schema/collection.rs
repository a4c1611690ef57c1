//! Sequence-shaped combinators: array, tuple, set, map.
//!
//! Array and tuple are strict: every failing position contributes its own
//! issues and the enclosing parse fails. Set and map are lenient by
//! design: a failing element is dropped from the output and leaves no
//! issue behind, the way a rejected union branch leaves none.

use serde_json::Value;
use stillwater::Validation;

use crate::context::Context;
use crate::error::{Issue, Issues};
use crate::limits;

use super::refine::SizeBounds;
use super::{Schema, SchemaKind};

pub(crate) fn array(item: Schema) -> Schema {
    let max = limits::defaults().array;
    let name = format!("array<{}>", item.name);
    Schema::leaf(name, SchemaKind::Array(Box::new(item))).size(SizeBounds::at_most(max))
}

pub(crate) fn tuple(items: Vec<Schema>) -> Schema {
    let name = format!(
        "tuple<{}>",
        items.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
    );
    Schema::leaf(name, SchemaKind::Tuple(items))
}

pub(crate) fn set(item: Schema) -> Schema {
    let max = limits::defaults().set;
    let name = format!("set<{}>", item.name);
    Schema::leaf(name, SchemaKind::Set(Box::new(item))).size(SizeBounds::at_most(max))
}

pub(crate) fn map(key: Schema, value: Schema) -> Schema {
    let max = limits::defaults().map;
    let name = format!("map<{}, {}>", key.name, value.name);
    Schema::leaf(
        name,
        SchemaKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        },
    )
    .size(SizeBounds::at_most(max))
}

/// Every element is attempted; n independently invalid positions produce
/// exactly n positions' worth of issues.
pub(crate) fn check_array(
    schema: &Schema,
    item: &Schema,
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let elements = match value.as_array() {
        Some(a) => a,
        None => return schema.mismatch(value, ctx),
    };

    let mut issues: Vec<Issue> = Vec::new();
    let mut out = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let child = ctx.enter_index(index);
        match item.check(element, &child) {
            Validation::Success(v) => out.push(v),
            Validation::Failure(found) => issues.extend(found),
        }
    }

    if issues.is_empty() {
        Validation::Success(Value::Array(out))
    } else {
        Validation::Failure(Issues::from_vec(issues))
    }
}

/// Too few elements is one top-level mismatch, not a failure per missing
/// position. Trailing extras beyond the declared positions are ignored.
pub(crate) fn check_tuple(
    schema: &Schema,
    items: &[Schema],
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let elements = match value.as_array() {
        Some(a) => a,
        None => return schema.mismatch(value, ctx),
    };
    if elements.len() < items.len() {
        return schema.mismatch(value, ctx);
    }

    let mut issues: Vec<Issue> = Vec::new();
    let mut out = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let child = ctx.enter_index(index);
        match item.check(&elements[index], &child) {
            Validation::Success(v) => out.push(v),
            Validation::Failure(found) => issues.extend(found),
        }
    }

    if issues.is_empty() {
        Validation::Success(Value::Array(out))
    } else {
        Validation::Failure(Issues::from_vec(issues))
    }
}

/// Lenient per element: a failing element is dropped, not fatal, and its
/// issues are discarded. Duplicates collapse to the first occurrence.
pub(crate) fn check_set(
    schema: &Schema,
    item: &Schema,
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let elements = match value.as_array() {
        Some(a) => a,
        None => return schema.mismatch(value, ctx),
    };

    let mut out: Vec<Value> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        let child = ctx.enter_index(index);
        if let Validation::Success(v) = item.check(element, &child) {
            if !out.contains(&v) {
                out.push(v);
            }
        }
    }

    Validation::Success(Value::Array(out))
}

/// Each entry is delegated to `tuple(key, value)`. Failing entries are
/// dropped like set elements; a later entry with an equal key replaces
/// the earlier one.
pub(crate) fn check_map(
    schema: &Schema,
    key: &Schema,
    value_schema: &Schema,
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    let entries = match value.as_array() {
        Some(a) => a,
        None => return schema.mismatch(value, ctx),
    };

    let entry_schema = super::collection::tuple(vec![key.clone(), value_schema.clone()]);
    let mut out: Vec<Value> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let child = ctx.enter_index(index);
        if let Validation::Success(pair) = entry_schema.check(entry, &child) {
            let entry_key = pair.as_array().and_then(|p| p.first()).cloned();
            match out.iter_mut().find(|existing| {
                existing.as_array().and_then(|p| p.first()).cloned() == entry_key
            }) {
                Some(existing) => *existing = pair,
                None => out.push(pair),
            }
        }
    }

    Validation::Success(Value::Array(out))
}
