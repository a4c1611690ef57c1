//! The terminal observable of a parse call.

use serde_json::Value;

use super::issue::Issues;

/// A failed parse, reported against the root of the run.
///
/// Whatever sub-path the defects sit at, `schema_name` and `input` are the
/// name of the outermost schema and the value handed to the outermost parse
/// call. The per-issue paths pinpoint the inner positions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation of '{schema_name}' failed: {issues}")]
pub struct ParseFailure {
    /// Name of the outermost schema.
    pub schema_name: String,
    /// The original root input value.
    pub input: Value,
    /// Every defect found, in encounter order.
    pub issues: Issues,
}

/// Success holding the coerced output, or failure holding the full issue
/// list. A caller never receives a partially filled output.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// The input conformed; holds the coerced output value.
    Valid(Value),
    /// At least one defect was found.
    Invalid(ParseFailure),
}

impl ParseResult {
    /// True on success.
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseResult::Valid(_))
    }

    /// True on failure.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ParseResult::Invalid(_))
    }

    /// The coerced output, if the parse succeeded.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ParseResult::Valid(v) => Some(v),
            ParseResult::Invalid(_) => None,
        }
    }

    /// The failure, if the parse did not succeed.
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseResult::Valid(_) => None,
            ParseResult::Invalid(f) => Some(f),
        }
    }

    /// The recorded issues, if the parse did not succeed.
    pub fn issues(&self) -> Option<&Issues> {
        self.failure().map(|f| &f.issues)
    }

    /// Converts into a `Result` for callers who want `?` instead of result
    /// inspection. `ParseFailure` implements `std::error::Error` and
    /// carries the full failure as its payload.
    pub fn into_result(self) -> Result<Value, ParseFailure> {
        match self {
            ParseResult::Valid(v) => Ok(v),
            ParseResult::Invalid(f) => Err(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Issue;
    use crate::path::Path;
    use serde_json::json;

    fn failure() -> ParseFailure {
        ParseFailure {
            schema_name: "object".to_string(),
            input: json!({"a": 1}),
            issues: Issues::single(Issue::mismatch(
                Path::root().key("a"),
                "string",
                &json!(1),
            )),
        }
    }

    #[test]
    fn accessors_discriminate() {
        let ok = ParseResult::Valid(json!(1));
        assert!(ok.is_valid());
        assert_eq!(ok.value(), Some(&json!(1)));
        assert!(ok.issues().is_none());

        let bad = ParseResult::Invalid(failure());
        assert!(bad.is_invalid());
        assert!(bad.value().is_none());
        assert_eq!(bad.issues().unwrap().len(), 1);
    }

    #[test]
    fn into_result_carries_the_failure() {
        let err = ParseResult::Invalid(failure()).into_result().unwrap_err();
        assert_eq!(err.schema_name, "object");
        assert_eq!(err.input, json!({"a": 1}));
        assert!(err.to_string().contains("validation of 'object' failed"));
    }
}
