//! Schema values and the recursive validation walk.
//!
//! A [`Schema`] is an immutable, shareable value: a name, an ordered set of
//! [`Refinement`]s, and a closed [`SchemaKind`]. Every evolution operation
//! (`map`, `convert_to`, `refine`, `optional`, `nullable`, `recover`,
//! `size`, `named`) returns a new schema and never mutates the source, so a
//! schema can be held by many composite parents and parsed from many
//! threads at once.
//!
//! Validation is a pure synchronous descent: each recursive step returns
//! its own `Validation<Value, Issues>` and the caller concatenates child
//! issues in order, which is how every violation is reported, not just the
//! first.

mod collection;
mod object;
mod primitive;
mod refine;
mod union;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Value};
use stillwater::Validation;

use crate::context::Context;
use crate::error::{Issue, Issues, ParseFailure, ParseResult};

pub use refine::{Refinement, SizeBounds};

/// Boolean classifier backing a guard leaf; success returns the input
/// unchanged.
pub type GuardFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Coercing leaf; `None` is a type mismatch.
pub type ConstructFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Pure post-structural transform installed by [`Schema::map`].
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Coercer installed by [`Schema::convert_to`]; `Err` is a coercion
/// failure reported as a type mismatch.
pub type CoerceFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Producer backing [`Schema::recover`]; always succeeds.
pub type FallbackFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// The closed set of schema kinds.
///
/// Exposed read-only so reflection consumers (documentation generators,
/// exporters) can walk a schema tree without re-parsing anything.
#[non_exhaustive]
#[derive(Clone)]
pub enum SchemaKind {
    /// Primitive leaf returning the input unchanged when the guard holds.
    Guard(GuardFn),
    /// Primitive leaf producing a coerced value, e.g. trimmed string,
    /// bigint, date.
    Construct(ConstructFn),
    /// Exact match against a finite member set; `null` is a valid member.
    Literal(Vec<Value>),
    /// Fixed shape: one declared schema per key, in declaration order.
    Object(IndexMap<String, Schema>),
    /// Homogeneous keyed map: every input key and value validated.
    Record {
        /// Schema each input key must satisfy.
        key: Box<Schema>,
        /// Schema each input value must satisfy.
        value: Box<Schema>,
    },
    /// Homogeneous list, one item schema per element.
    Array(Box<Schema>),
    /// Fixed heterogeneous positions; trailing extras are ignored.
    Tuple(Vec<Schema>),
    /// Deduplicated list; failing elements are dropped, not fatal.
    Set(Box<Schema>),
    /// List of `[key, value]` pairs; failing entries are dropped.
    Map {
        /// Schema for the first pair position.
        key: Box<Schema>,
        /// Schema for the second pair position.
        value: Box<Schema>,
    },
    /// Ordered alternation, first match wins.
    Union(Vec<Schema>),
    /// Matches `null` (or an absent object field) and yields a default.
    Absent {
        /// Value substituted for the missing input.
        default: Value,
    },
    /// Always succeeds with a freshly produced value.
    Fallback(FallbackFn),
    /// Applies a pure transform after the inner schema succeeds.
    Transform {
        /// Structural schema run first.
        inner: Box<Schema>,
        /// Transform applied to the inner output.
        transform: TransformFn,
    },
    /// Coerces the inner output and hands it to a different schema.
    Convert {
        /// Structural schema run first.
        inner: Box<Schema>,
        /// Schema the coerced value must then satisfy.
        target: Box<Schema>,
        /// Coercer bridging the two.
        convert: CoerceFn,
    },
}

impl fmt::Debug for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            SchemaKind::Guard(_) => "Guard",
            SchemaKind::Construct(_) => "Construct",
            SchemaKind::Literal(_) => "Literal",
            SchemaKind::Object(_) => "Object",
            SchemaKind::Record { .. } => "Record",
            SchemaKind::Array(_) => "Array",
            SchemaKind::Tuple(_) => "Tuple",
            SchemaKind::Set(_) => "Set",
            SchemaKind::Map { .. } => "Map",
            SchemaKind::Union(_) => "Union",
            SchemaKind::Absent { .. } => "Absent",
            SchemaKind::Fallback(_) => "Fallback",
            SchemaKind::Transform { .. } => "Transform",
            SchemaKind::Convert { .. } => "Convert",
        };
        f.write_str(tag)
    }
}

/// An immutable named validator from untyped input to a coerced output or
/// a structured failure.
#[derive(Clone)]
pub struct Schema {
    name: String,
    kind: SchemaKind,
    refinements: Vec<Refinement>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field(
                "refinements",
                &self.refinements.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction

impl Schema {
    pub(crate) fn leaf(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            kind,
            refinements: Vec::new(),
        }
    }

    /// String: type check, whitespace-trims, and size-bounds the trimmed
    /// result with the default in force at construction time.
    pub fn string() -> Schema {
        primitive::string()
    }

    /// String without trimming; still size-bounded by default.
    pub fn untrimmed_string() -> Schema {
        primitive::untrimmed_string()
    }

    /// Any JSON number. JSON numbers are always finite.
    pub fn number() -> Schema {
        primitive::number()
    }

    /// Number that additionally accepts the string spellings `"NaN"`,
    /// `"Infinity"`, and `"-Infinity"`, which is the only way non-finite
    /// doubles can ride in JSON.
    pub fn unsafe_number() -> Schema {
        primitive::unsafe_number()
    }

    /// Integer within `i64`; rejects floats, including `1.0`.
    pub fn integer() -> Schema {
        primitive::integer()
    }

    /// Integer that additionally accepts `u64` beyond `i64::MAX` and
    /// floats with a zero fractional part.
    pub fn unsafe_integer() -> Schema {
        primitive::unsafe_integer()
    }

    /// Boolean.
    pub fn boolean() -> Schema {
        primitive::boolean()
    }

    /// Arbitrary-precision integer. Accepts integral numbers, decimal
    /// strings, and booleans; the output is the canonical decimal string.
    pub fn big_int() -> Schema {
        primitive::big_int()
    }

    /// Calendar date. Accepts RFC 3339 strings, `YYYY-MM-DD` strings, and
    /// epoch milliseconds; the output is the normalized RFC 3339 string.
    pub fn date() -> Schema {
        primitive::date()
    }

    /// Exact match against an explicit finite member set. `null` is a
    /// valid member when listed.
    pub fn literal(members: impl IntoIterator<Item = Value>) -> Schema {
        primitive::literal(members.into_iter().collect())
    }

    /// Literal over an enum-like mapping's value set.
    pub fn enumeration<K, I>(entries: I) -> Schema
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        primitive::enumeration(entries.into_iter().map(|(_, v)| v).collect())
    }

    /// Named guard over an arbitrary predicate. This is the generalization
    /// of a runtime type-tag check over untyped values.
    pub fn custom<F>(name: impl Into<String>, guard: F) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Schema::leaf(name, SchemaKind::Guard(Arc::new(guard)))
    }

    /// Fixed-shape object. Declared keys are validated in declaration
    /// order; unknown input keys are silently dropped from the output.
    pub fn object<K, I>(fields: I) -> Schema
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        object::object(
            fields
                .into_iter()
                .map(|(k, s)| (k.into(), s))
                .collect(),
        )
    }

    /// Homogeneous keyed map over arbitrary input keys.
    pub fn record(key: Schema, value: Schema) -> Schema {
        object::record(key, value)
    }

    /// Homogeneous list; every element is validated and every element
    /// failure is reported.
    pub fn array(item: Schema) -> Schema {
        collection::array(item)
    }

    /// Fixed heterogeneous positions. Too few elements is a single
    /// top-level failure; trailing extras are ignored.
    pub fn tuple(items: Vec<Schema>) -> Schema {
        collection::tuple(items)
    }

    /// Deduplicated collection; elements that fail are dropped from the
    /// output rather than failing the parse.
    pub fn set(item: Schema) -> Schema {
        collection::set(item)
    }

    /// Collection of `[key, value]` pairs, each validated as a two-tuple;
    /// failing entries are dropped, a later equal key replaces an earlier
    /// one. Named `map_of` to leave `map` for the transform evolution.
    pub fn map_of(key: Schema, value: Schema) -> Schema {
        collection::map(key, value)
    }

    /// Ordered alternation: the first alternative whose parse succeeds
    /// wins, and losing branches leave no issues behind.
    pub fn union(alternatives: Vec<Schema>) -> Schema {
        union::union(alternatives)
    }

    /// A union of object schemas sharing a discriminant key. The
    /// discriminant is used only to build a readable name; alternatives
    /// are still tried in order.
    pub fn variant(discriminant: &str, alternatives: Vec<Schema>) -> Schema {
        union::variant(discriminant, alternatives)
    }
}

// ---------------------------------------------------------------------------
// Evolution

impl Schema {
    /// The reported name of this schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the schema's kind and constituent sub-schemas.
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// The attached refinements, in evaluation order.
    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Returns a copy of this schema under a different reported name.
    pub fn named(mut self, name: impl Into<String>) -> Schema {
        self.name = name.into();
        self
    }

    /// Appends a named predicate evaluated after structural parsing
    /// succeeds. Refinements run in insertion order and the first failing
    /// one stops the chain.
    pub fn refine<F>(mut self, name: impl Into<String>, metadata: Value, predicate: F) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement::new(name, metadata, predicate));
        self
    }

    /// Installs or replaces the `size` refinement with inclusive bounds.
    ///
    /// Repeated calls replace the previous bound pair rather than combine
    /// with it. Bounds are applied literally: a `min > max` configuration
    /// is not rejected, it fails every measured value.
    pub fn size(mut self, bounds: SizeBounds) -> Schema {
        let replacement = refine::size_refinement(bounds);
        match self.refinements.iter_mut().find(|r| r.name() == "size") {
            Some(slot) => *slot = replacement,
            None => self.refinements.push(replacement),
        }
        self
    }

    /// Applies a pure transform to the structurally valid value.
    ///
    /// Previously attached refinements are dropped: they described the
    /// pre-transform shape and a value-changing transform invalidates
    /// them.
    pub fn map<F>(self, transform: F) -> Schema
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let name = self.name.clone();
        let inner = Schema {
            refinements: Vec::new(),
            ..self
        };
        Schema {
            name,
            kind: SchemaKind::Transform {
                inner: Box::new(inner),
                transform: Arc::new(transform),
            },
            refinements: Vec::new(),
        }
    }

    /// Coerces the structurally valid value and hands it to a different
    /// schema, whose own failures propagate. A coercer error becomes a
    /// single type-mismatch issue. Drops previously attached refinements,
    /// like [`Schema::map`].
    pub fn convert_to<F>(self, target: Schema, convert: F) -> Schema
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = format!("{} as {}", self.name, target.name);
        let inner = Schema {
            refinements: Vec::new(),
            ..self
        };
        Schema {
            name,
            kind: SchemaKind::Convert {
                inner: Box::new(inner),
                target: Box::new(target),
                convert: Arc::new(convert),
            },
            refinements: Vec::new(),
        }
    }

    /// Alternation between "input is absent/null, yield `null`" and this
    /// schema. At an object field, absence of the key is accepted.
    pub fn optional(self) -> Schema {
        self.optional_or(Value::Null)
    }

    /// [`Schema::optional`] with an explicit default for the absent case.
    pub fn optional_or(self, default: Value) -> Schema {
        let name = format!("optional<{}>", self.name);
        let absent = Schema::leaf("absent", SchemaKind::Absent { default });
        Schema {
            name,
            kind: SchemaKind::Union(vec![absent, self]),
            refinements: Vec::new(),
        }
    }

    /// Alternation between "input is exactly `null`, yield `null`" and
    /// this schema. Unlike [`Schema::optional`], an object field using
    /// this must still be present.
    pub fn nullable(self) -> Schema {
        self.nullable_or(Value::Null)
    }

    /// [`Schema::nullable`] with an explicit default for the null case.
    pub fn nullable_or(self, default: Value) -> Schema {
        let name = format!("nullable<{}>", self.name);
        let null_arm = Schema::literal([Value::Null]).map(move |_| default.clone());
        Schema {
            name,
            kind: SchemaKind::Union(vec![null_arm, self]),
            refinements: Vec::new(),
        }
    }

    /// Alternation with an always-succeeding fallback producer: the parse
    /// can no longer fail, and issues from the primary branch are
    /// swallowed when it does.
    pub fn recover<F>(self, fallback: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        let name = self.name.clone();
        let arm = Schema::leaf("fallback", SchemaKind::Fallback(Arc::new(fallback)));
        Schema {
            name,
            kind: SchemaKind::Union(vec![self, arm]),
            refinements: Vec::new(),
        }
    }

    /// Regex refinement on string values. Construction fails on an
    /// invalid pattern.
    pub fn pattern(self, pattern: &str) -> Result<Schema, regex::Error> {
        let re = regex::Regex::new(pattern)?;
        let metadata = json!({ "pattern": pattern });
        Ok(self.refine("pattern", metadata, move |v| {
            v.as_str().map_or(true, |s| re.is_match(s))
        }))
    }

    /// Inclusive lower-bound refinement on numeric values.
    pub fn at_least(self, min: f64) -> Schema {
        self.refine("min", json!({ "min": min }), move |v| {
            v.as_f64().map_or(true, |n| n >= min)
        })
    }

    /// Inclusive upper-bound refinement on numeric values.
    pub fn at_most(self, max: f64) -> Schema {
        self.refine("max", json!({ "max": max }), move |v| {
            v.as_f64().map_or(true, |n| n <= max)
        })
    }

    /// The default an object combinator substitutes when this schema sits
    /// at an absent field. `Some` only for optional-style alternations.
    pub(crate) fn absent_default(&self) -> Option<Value> {
        match &self.kind {
            SchemaKind::Absent { default } => Some(default.clone()),
            SchemaKind::Union(alts) => match alts.first().map(Schema::kind) {
                Some(SchemaKind::Absent { default }) => Some(default.clone()),
                _ => None,
            },
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing

impl Schema {
    /// Validates `input`, creating a fresh root context named after this
    /// schema. Never panics and never fails with an exception: all
    /// validation failures are collected into the returned result.
    pub fn parse(&self, input: &Value) -> ParseResult {
        let ctx = Context::new(&self.name, input);
        self.parse_with(input, &ctx)
    }

    /// Validates `input` inside an existing traversal context. The failure
    /// is reported against the context's root schema name and root input,
    /// not this schema's.
    pub fn parse_with(&self, input: &Value, ctx: &Context<'_>) -> ParseResult {
        match self.check(input, ctx) {
            Validation::Success(value) => ParseResult::Valid(value),
            Validation::Failure(issues) => ParseResult::Invalid(ParseFailure {
                schema_name: ctx.root_schema_name().to_string(),
                input: ctx.root_input().clone(),
                issues,
            }),
        }
    }

    /// Validates `input` and deserializes the coerced output into `T`.
    pub fn parse_as<T: serde::de::DeserializeOwned>(
        &self,
        input: &Value,
    ) -> Result<T, ParseFailure> {
        let value = self.parse(input).into_result()?;
        serde_json::from_value(value).map_err(|err| ParseFailure {
            schema_name: self.name.clone(),
            input: input.clone(),
            issues: Issues::single(Issue {
                schema_name: self.name.clone(),
                input: input.clone(),
                path: crate::path::Path::root(),
                refinement: None,
                message: format!("validated value could not be extracted: {}", err),
            }),
        })
    }

    /// One recursive step: structural check for this schema's kind, then
    /// the refinement chain over the coerced output.
    pub(crate) fn check(&self, value: &Value, ctx: &Context<'_>) -> Validation<Value, Issues> {
        let structural = match &self.kind {
            SchemaKind::Guard(guard) => {
                if guard(value) {
                    Validation::Success(value.clone())
                } else {
                    self.mismatch(value, ctx)
                }
            }
            SchemaKind::Construct(construct) => match construct(value) {
                Some(out) => Validation::Success(out),
                None => self.mismatch(value, ctx),
            },
            SchemaKind::Literal(members) => {
                if members.iter().any(|m| m == value) {
                    Validation::Success(value.clone())
                } else {
                    self.mismatch(value, ctx)
                }
            }
            SchemaKind::Object(fields) => object::check_object(self, fields, value, ctx),
            SchemaKind::Record { key, value: val } => {
                object::check_record(self, key, val, value, ctx)
            }
            SchemaKind::Array(item) => collection::check_array(self, item, value, ctx),
            SchemaKind::Tuple(items) => collection::check_tuple(self, items, value, ctx),
            SchemaKind::Set(item) => collection::check_set(self, item, value, ctx),
            SchemaKind::Map { key, value: val } => {
                collection::check_map(self, key, val, value, ctx)
            }
            SchemaKind::Union(alternatives) => {
                union::check_union(self, alternatives, value, ctx)
            }
            SchemaKind::Absent { default } => {
                if value.is_null() {
                    Validation::Success(default.clone())
                } else {
                    self.mismatch(value, ctx)
                }
            }
            SchemaKind::Fallback(produce) => Validation::Success(produce()),
            SchemaKind::Transform { inner, transform } => {
                inner.check(value, ctx).map(|out| transform(out))
            }
            SchemaKind::Convert {
                inner,
                target,
                convert,
            } => match inner.check(value, ctx) {
                Validation::Success(out) => match convert(out) {
                    Ok(coerced) => target.check(&coerced, ctx),
                    Err(_) => self.mismatch(value, ctx),
                },
                failure => failure,
            },
        };

        match structural {
            Validation::Success(out) => self.check_refinements(out, ctx),
            failure => failure,
        }
    }

    /// Runs the refinement chain in insertion order against the coerced
    /// output. First failure wins; later refinements are not evaluated.
    fn check_refinements(&self, out: Value, ctx: &Context<'_>) -> Validation<Value, Issues> {
        for refinement in &self.refinements {
            if !refinement.check(&out) {
                return Validation::Failure(Issues::single(Issue::refinement_failed(
                    ctx.path().clone(),
                    &self.name,
                    &out,
                    refinement.tag(),
                )));
            }
        }
        Validation::Success(out)
    }

    pub(crate) fn mismatch(&self, value: &Value, ctx: &Context<'_>) -> Validation<Value, Issues> {
        Validation::Failure(Issues::single(Issue::mismatch(
            ctx.path().clone(),
            &self.name,
            value,
        )))
    }
}

// Schemas are shared across composite parents and across threads; the whole
// tree must stay Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
