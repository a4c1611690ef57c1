//! Refinements: named post-structural predicates.
//!
//! A refinement runs only after structural parsing has produced a value; it
//! checks the coerced output, not the raw input. Refinements on one schema
//! are evaluated in insertion order and short-circuit on the first failure,
//! unlike sibling fields, which accumulate.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::RefinementTag;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named boolean predicate with attached metadata.
#[derive(Clone)]
pub struct Refinement {
    name: String,
    metadata: Value,
    predicate: Predicate,
}

impl Refinement {
    /// Creates a refinement from a name, metadata, and predicate.
    pub fn new<F>(name: impl Into<String>, metadata: Value, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            metadata,
            predicate: Arc::new(predicate),
        }
    }

    /// The name the refinement is attached under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The metadata the refinement was constructed with.
    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    pub(crate) fn tag(&self) -> RefinementTag {
        RefinementTag {
            name: self.name.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Inclusive bounds for the `size` refinement.
///
/// Bounds are applied literally; a configuration where `min > max` is not
/// rejected at construction, it simply fails every measured value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBounds {
    /// Inclusive lower bound on the measured size.
    pub min: Option<usize>,
    /// Inclusive upper bound on the measured size.
    pub max: Option<usize>,
}

impl SizeBounds {
    /// Bounds with only a minimum.
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Bounds with only a maximum.
    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Bounds with both ends, inclusive.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// The length-or-count measure the `size` refinement inspects.
///
/// Values without a natural size (numbers, booleans, null) measure as
/// `None` and pass the refinement vacuously.
pub(crate) fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        Value::Object(o) => Some(o.len()),
        _ => None,
    }
}

pub(crate) fn size_refinement(bounds: SizeBounds) -> Refinement {
    let SizeBounds { min, max } = bounds;
    let mut meta = Map::new();
    if let Some(min) = min {
        meta.insert("min".to_string(), Value::from(min));
    }
    if let Some(max) = max {
        meta.insert("max".to_string(), Value::from(max));
    }
    Refinement::new("size", Value::Object(meta), move |value| {
        match measure(value) {
            Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
            None => true,
        }
    })
}
