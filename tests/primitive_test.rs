//! Primitive schema behavior: type guards, coercions, and the issues they
//! record.

use inquest::{ParseResult, Schema};
use serde_json::{json, Value};

fn valid(result: ParseResult) -> Value {
    result.into_result().expect("expected a valid parse")
}

fn single_issue(result: &ParseResult) -> &inquest::Issue {
    let issues = result.issues().expect("expected a failed parse");
    assert_eq!(issues.len(), 1);
    issues.first()
}

#[test]
fn string_trims_surrounding_whitespace() {
    assert_eq!(valid(Schema::string().parse(&json!("  hello  "))), json!("hello"));
}

#[test]
fn untrimmed_string_preserves_whitespace() {
    let out = valid(Schema::untrimmed_string().parse(&json!("  hello  ")));
    assert_eq!(out, json!("  hello  "));
}

#[test]
fn string_rejects_non_strings() {
    let result = Schema::string().parse(&json!(42));
    let issue = single_issue(&result);
    assert_eq!(issue.schema_name, "string");
    assert_eq!(issue.message, "expected string");
    assert_eq!(issue.input, json!(42));
    assert!(issue.refinement.is_none());
}

#[test]
fn string_carries_a_default_size_guard() {
    let result = Schema::string().parse(&json!("a".repeat(1001)));
    let issue = single_issue(&result);
    assert_eq!(issue.refinement.as_ref().unwrap().name, "size");

    assert!(Schema::string().parse(&json!("a".repeat(1000))).is_valid());
}

#[test]
fn number_accepts_integers_and_floats() {
    assert!(Schema::number().parse(&json!(3)).is_valid());
    assert!(Schema::number().parse(&json!(1.5)).is_valid());
    assert!(Schema::number().parse(&json!("3")).is_invalid());
}

#[test]
fn unsafe_number_accepts_non_finite_spellings() {
    let schema = Schema::unsafe_number();
    assert!(schema.parse(&json!("NaN")).is_valid());
    assert!(schema.parse(&json!("Infinity")).is_valid());
    assert!(schema.parse(&json!("-Infinity")).is_valid());
    assert!(schema.parse(&json!("nan")).is_invalid());
    assert!(schema.parse(&json!(1.5)).is_valid());
}

#[test]
fn integer_rejects_floats_even_when_integral() {
    assert!(Schema::integer().parse(&json!(7)).is_valid());
    assert!(Schema::integer().parse(&json!(1.5)).is_invalid());
    assert!(Schema::integer().parse(&json!(u64::MAX)).is_invalid());
}

#[test]
fn unsafe_integer_accepts_wide_and_integral_values() {
    let schema = Schema::unsafe_integer();
    assert!(schema.parse(&json!(u64::MAX)).is_valid());
    assert!(schema.parse(&json!(2.0)).is_valid());
    assert!(schema.parse(&json!(2.5)).is_invalid());
    assert!(schema.parse(&json!("2")).is_invalid());
}

#[test]
fn boolean_guards_exactly_booleans() {
    assert!(Schema::boolean().parse(&json!(true)).is_valid());
    assert!(Schema::boolean().parse(&json!(0)).is_invalid());
}

#[test]
fn big_int_normalizes_to_decimal_strings() {
    let schema = Schema::big_int();
    assert_eq!(valid(schema.parse(&json!(42))), json!("42"));
    assert_eq!(
        valid(schema.parse(&json!(u64::MAX))),
        json!("18446744073709551615")
    );
    assert_eq!(valid(schema.parse(&json!(" 00123 "))), json!("123"));
    assert_eq!(valid(schema.parse(&json!(true))), json!("1"));
    assert_eq!(valid(schema.parse(&json!(false))), json!("0"));
}

#[test]
fn big_int_accepts_magnitudes_beyond_machine_integers() {
    let schema = Schema::big_int();
    // 2^127, one past i128::MAX
    let large = "170141183460469231731687303715884105728";
    assert_eq!(valid(schema.parse(&json!(large))), json!(large));
    assert_eq!(
        valid(schema.parse(&json!("-170141183460469231731687303715884105729"))),
        json!("-170141183460469231731687303715884105729")
    );
}

#[test]
fn big_int_canonicalizes_signs_and_zeros() {
    let schema = Schema::big_int();
    assert_eq!(valid(schema.parse(&json!("+5"))), json!("5"));
    assert_eq!(valid(schema.parse(&json!("-0"))), json!("0"));
    assert_eq!(valid(schema.parse(&json!("-007"))), json!("-7"));
    assert!(schema.parse(&json!("--5")).is_invalid());
    assert!(schema.parse(&json!("+")).is_invalid());
    assert!(schema.parse(&json!("12 34")).is_invalid());
}

#[test]
fn big_int_rejects_fractions_and_garbage() {
    let schema = Schema::big_int();
    assert!(schema.parse(&json!(1.5)).is_invalid());
    let result = schema.parse(&json!("twelve"));
    assert_eq!(single_issue(&result).schema_name, "bigint");
}

#[test]
fn date_normalizes_all_accepted_forms() {
    let schema = Schema::date();
    assert_eq!(
        valid(schema.parse(&json!("2024-03-05T12:00:00Z"))),
        json!("2024-03-05T12:00:00+00:00")
    );
    assert_eq!(
        valid(schema.parse(&json!("2024-03-05"))),
        json!("2024-03-05T00:00:00+00:00")
    );
    assert_eq!(
        valid(schema.parse(&json!(0))),
        json!("1970-01-01T00:00:00+00:00")
    );
}

#[test]
fn date_output_reparses_to_itself() {
    let schema = Schema::date();
    let once = valid(schema.parse(&json!("2031-12-01")));
    let twice = valid(schema.parse(&once));
    assert_eq!(once, twice);
}

#[test]
fn date_rejects_invalid_dates() {
    let schema = Schema::date();
    assert!(schema.parse(&json!("not a date")).is_invalid());
    assert!(schema.parse(&json!("2024-13-40")).is_invalid());
    assert!(schema.parse(&json!(true)).is_invalid());
}

#[test]
fn literal_matches_members_including_null() {
    let schema = Schema::literal([json!("a"), json!(1), json!(true), Value::Null]);
    assert_eq!(schema.name(), "literal(a, 1, true, null)");
    assert!(schema.parse(&json!("a")).is_valid());
    assert!(schema.parse(&json!(1)).is_valid());
    assert!(schema.parse(&Value::Null).is_valid());

    let result = schema.parse(&json!("b"));
    let issue = single_issue(&result);
    assert!(issue.refinement.is_none());
    assert_eq!(issue.schema_name, "literal(a, 1, true, null)");
}

#[test]
fn enumeration_matches_the_value_set() {
    let schema = Schema::enumeration([("Red", json!("red")), ("Blue", json!("blue"))]);
    assert_eq!(schema.name(), "enum");
    assert!(schema.parse(&json!("red")).is_valid());
    assert!(schema.parse(&json!("Red")).is_invalid());
}

#[test]
fn custom_guard_reports_under_its_own_name() {
    let schema = Schema::custom("even", |v: &Value| {
        v.as_i64().map_or(false, |n| n % 2 == 0)
    });
    assert!(schema.parse(&json!(4)).is_valid());
    let result = schema.parse(&json!(3));
    assert_eq!(single_issue(&result).message, "expected even");
}
