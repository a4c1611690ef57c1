//! Ordered alternation and its discriminated-naming convenience.

use serde_json::Value;
use stillwater::Validation;

use crate::context::Context;
use crate::error::Issues;

use super::primitive::label;
use super::{Schema, SchemaKind};

pub(crate) fn union(alternatives: Vec<Schema>) -> Schema {
    let name = format!(
        "union<{}>",
        alternatives
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    Schema::leaf(name, SchemaKind::Union(alternatives))
}

/// A union whose name is derived from a shared discriminant key. When an
/// alternative is an object schema with a single-member literal at the
/// discriminant, that member labels the alternative; otherwise its own
/// name does. The discriminant never short-circuits which alternative is
/// tried.
pub(crate) fn variant(discriminant: &str, alternatives: Vec<Schema>) -> Schema {
    let labels: Vec<String> = alternatives
        .iter()
        .map(|alt| discriminant_label(discriminant, alt).unwrap_or_else(|| alt.name.clone()))
        .collect();
    let name = format!("variant<{}: {}>", discriminant, labels.join(" | "));
    Schema::leaf(name, SchemaKind::Union(alternatives))
}

fn discriminant_label(discriminant: &str, alt: &Schema) -> Option<String> {
    match &alt.kind {
        SchemaKind::Object(fields) => match fields.get(discriminant).map(Schema::kind) {
            Some(SchemaKind::Literal(members)) if members.len() == 1 => {
                Some(label(&members[0]))
            }
            _ => None,
        },
        _ => None,
    }
}

/// First alternative whose parse succeeds wins, deterministically in
/// declaration order. Each alternative runs against its own isolated
/// result; issues from rejected branches are discarded, and only a single
/// issue naming the union survives when every branch rejects.
pub(crate) fn check_union(
    schema: &Schema,
    alternatives: &[Schema],
    value: &Value,
    ctx: &Context<'_>,
) -> Validation<Value, Issues> {
    for alternative in alternatives {
        if let Validation::Success(out) = alternative.check(value, ctx) {
            return Validation::Success(out);
        }
    }
    schema.mismatch(value, ctx)
}
