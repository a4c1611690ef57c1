//! Process-wide size defaults. Kept in its own binary, and in a single
//! test, because it mutates global state.

use inquest::{limits, Schema, SizeDefaults};
use serde_json::json;

#[test]
fn defaults_apply_at_construction_time_only() {
    let original = limits::defaults();
    assert_eq!(original, SizeDefaults::default());

    let built_before = Schema::array(Schema::integer());

    limits::set_defaults(SizeDefaults {
        array: 2,
        string: 4,
        ..original
    });

    let built_after = Schema::array(Schema::integer());
    let three = json!([1, 2, 3]);

    // the earlier schema keeps the bound it captured
    assert!(built_before.parse(&three).is_valid());

    let result = built_after.parse(&three);
    assert!(result.is_invalid());
    let issue = result.issues().unwrap().first().clone();
    assert_eq!(issue.refinement.as_ref().unwrap().name, "size");
    assert_eq!(issue.refinement.as_ref().unwrap().metadata, json!({"max": 2}));

    // strings pick up their own knob
    assert!(Schema::string().parse(&json!("abcde")).is_invalid());

    limits::set_defaults(original);
    assert!(Schema::array(Schema::integer()).parse(&three).is_valid());
    assert!(Schema::string().parse(&json!("abcde")).is_valid());
}
