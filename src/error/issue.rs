//! Individual defects and their non-empty collection.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::Path;

/// Identifies the named refinement a structurally valid value failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementTag {
    /// Name the refinement was attached under, e.g. `size` or `pattern`.
    pub name: String,
    /// Arbitrary metadata the refinement was constructed with.
    pub metadata: Value,
}

/// One recorded point of non-conformance.
///
/// An issue is immutable once created. The message is derived eagerly at
/// creation time: it names the refinement when one is present, otherwise
/// the schema. Callers should compare issues by field values, never by
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Name of the schema active at the failure point.
    pub schema_name: String,
    /// The offending input value.
    pub input: Value,
    /// Where in the root input the defect sits.
    pub path: Path,
    /// Present when a structurally valid value failed a named predicate.
    pub refinement: Option<RefinementTag>,
    /// Human-readable description of the defect.
    pub message: String,
}

impl Issue {
    /// Records a shape/type mismatch: the input did not match the schema's
    /// expected kind.
    pub fn mismatch(path: Path, schema_name: impl Into<String>, input: &Value) -> Self {
        let schema_name = schema_name.into();
        let message = format!("expected {}", schema_name);
        Self {
            schema_name,
            input: input.clone(),
            path,
            refinement: None,
            message,
        }
    }

    /// Records a refinement violation on a structurally valid value.
    pub fn refinement_failed(
        path: Path,
        schema_name: impl Into<String>,
        input: &Value,
        refinement: RefinementTag,
    ) -> Self {
        let message = format!("does not satisfy refinement '{}'", refinement.name);
        Self {
            schema_name: schema_name.into(),
            input: input.clone(),
            path,
            refinement: Some(refinement),
            message,
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Issue {}

/// A non-empty, ordered collection of issues.
///
/// A parse run produces its issues deterministically, left to right and
/// depth first. Wrapping `NonEmptyVec` guarantees a failure always carries
/// at least one issue; `Semigroup` lets sibling failures be concatenated
/// without losing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// A collection holding exactly one issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Builds a collection from an accumulated vector.
    ///
    /// # Panics
    ///
    /// Panics if `issues` is empty. Call sites accumulate into a `Vec` and
    /// only convert after observing at least one defect.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Number of issues, always at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the issues in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// The first recorded issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// All issues recorded at the given path.
    pub fn at_path(&self, path: &Path) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Consumes the collection into a plain vector.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Issues travel across threads inside parse failures; keep that true if the
// field types ever change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
    assert_send::<Issues>();
    assert_sync::<Issues>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mismatch_message_names_the_schema() {
        let issue = Issue::mismatch(Path::root().key("age"), "integer", &json!("x"));
        assert_eq!(issue.message, "expected integer");
        assert!(issue.refinement.is_none());
        assert_eq!(issue.input, json!("x"));
    }

    #[test]
    fn refinement_message_names_the_refinement() {
        let tag = RefinementTag {
            name: "size".to_string(),
            metadata: json!({"max": 3}),
        };
        let issue = Issue::refinement_failed(Path::root(), "string", &json!("abcd"), tag);
        assert_eq!(issue.message, "does not satisfy refinement 'size'");
        assert_eq!(issue.refinement.as_ref().unwrap().name, "size");
    }

    #[test]
    fn display_shows_root_marker() {
        let issue = Issue::mismatch(Path::root(), "boolean", &json!(1));
        assert!(issue.to_string().contains("(root): expected boolean"));
    }

    #[test]
    fn combine_preserves_order() {
        let a = Issues::single(Issue::mismatch(Path::root().key("a"), "string", &json!(1)));
        let b = Issues::single(Issue::mismatch(Path::root().key("b"), "string", &json!(2)));
        let combined = a.combine(b);
        assert_eq!(combined.len(), 2);
        let paths: Vec<_> = combined.iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn at_path_filters() {
        let p = Path::root().key("x");
        let issues = Issues::single(Issue::mismatch(p.clone(), "string", &json!(1)))
            .combine(Issues::single(Issue::mismatch(
                Path::root().key("y"),
                "string",
                &json!(2),
            )));
        assert_eq!(issues.at_path(&p).len(), 1);
    }
}
