//! Traversal context threaded through a parse run.
//!
//! A [`Context`] pins the identity of the outermost parse call (which
//! schema was asked, which input it was given) while the current path
//! advances into the input. However deep a defect sits, the final failure
//! reports the root schema and the root input; only the paths on individual
//! issues point at the inner positions.

use serde_json::Value;

use crate::path::Path;

/// Scoped traversal state for one top-level parse call.
///
/// Derived contexts share the root fields and extend only the path. A child
/// schema must never replace the root identity; [`Context::enter_key`] and
/// [`Context::enter_index`] enforce that by construction.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    root_schema_name: &'a str,
    root_input: &'a Value,
    path: Path,
}

impl<'a> Context<'a> {
    /// Creates a root context with an empty path.
    pub fn new(root_schema_name: &'a str, root_input: &'a Value) -> Self {
        Self {
            root_schema_name,
            root_input,
            path: Path::root(),
        }
    }

    /// The name of the outermost schema of this parse run.
    pub fn root_schema_name(&self) -> &str {
        self.root_schema_name
    }

    /// The value passed to the outermost parse call.
    pub fn root_input(&self) -> &Value {
        self.root_input
    }

    /// The position currently being validated.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Derives a context one object/record key deeper.
    pub fn enter_key(&self, name: impl Into<String>) -> Self {
        Self {
            root_schema_name: self.root_schema_name,
            root_input: self.root_input,
            path: self.path.key(name),
        }
    }

    /// Derives a context one element index deeper.
    pub fn enter_index(&self, index: usize) -> Self {
        Self {
            root_schema_name: self.root_schema_name,
            root_input: self.root_input,
            path: self.path.index(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_fields_survive_descent() {
        let input = json!({"a": [1, 2]});
        let ctx = Context::new("profile", &input);
        let child = ctx.enter_key("a").enter_index(1);

        assert_eq!(child.root_schema_name(), "profile");
        assert_eq!(child.root_input(), &input);
        assert_eq!(child.path().to_string(), "a[1]");
        // the parent path is untouched
        assert!(ctx.path().is_root());
    }

    #[test]
    fn siblings_get_independent_paths() {
        let input = json!({});
        let ctx = Context::new("s", &input);
        let a = ctx.enter_key("a");
        let b = ctx.enter_key("b");
        assert_eq!(a.path().to_string(), "a");
        assert_eq!(b.path().to_string(), "b");
    }
}
