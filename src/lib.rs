//! # Inquest
//!
//! A runtime structural-validation engine: given an arbitrary untyped
//! value and a declarative schema, it decides whether the value conforms,
//! coerces it into a normalized output, and on mismatch reports every
//! violation found, not just the first.
//!
//! ## Overview
//!
//! Schemas are built from combinators (object, array, tuple, set, map,
//! record, union, literal, primitives) and evolved functionally with
//! `map`, `convert_to`, `refine`, `optional`, `nullable`, and `recover`.
//! Parsing is a pure synchronous descent over the input: sibling failures
//! accumulate, refinement chains short-circuit, and rejected union
//! branches leave no issues behind.
//!
//! ## Core Types
//!
//! - [`Schema`]: an immutable named validator/transformer
//! - [`Path`]: the location of a value in a nested structure (e.g. `users[0].email`)
//! - [`Issue`] / [`Issues`]: one defect, and the non-empty ordered collection of them
//! - [`ParseResult`] / [`ParseFailure`]: the outcome of a parse call,
//!   always reported against the root schema and root input
//! - [`Context`]: traversal state threading root identity and current path
//!
//! ## Example
//!
//! ```rust
//! use inquest::Schema;
//! use serde_json::json;
//!
//! let user = Schema::object([
//!     ("name", Schema::string()),
//!     ("age", Schema::integer()),
//! ]);
//!
//! assert!(user.parse(&json!({"name": "Ada", "age": 36})).is_valid());
//!
//! // Both defects are reported in one pass.
//! let result = user.parse(&json!({"name": 42, "age": "x"}));
//! assert_eq!(result.issues().unwrap().len(), 2);
//! ```

pub mod context;
pub mod error;
pub mod limits;
pub mod path;
pub mod schema;

pub use context::Context;
pub use error::{Issue, Issues, ParseFailure, ParseResult, RefinementTag};
pub use limits::SizeDefaults;
pub use path::{Path, PathSegment};
pub use schema::{Refinement, Schema, SchemaKind, SizeBounds};
