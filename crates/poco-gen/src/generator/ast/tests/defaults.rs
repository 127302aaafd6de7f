use serde_json::{Value, json};

use crate::generator::ast::DefaultValue;

#[test]
fn test_default_precedence() {
  let cases: [(Value, DefaultValue); 12] = [
    (json!(5), DefaultValue::Integer(5)),
    (json!("-12"), DefaultValue::Integer(-12)),
    (json!(" 7 "), DefaultValue::Integer(7)),
    (json!(2.5), DefaultValue::Float(2.5)),
    (json!("1e3"), DefaultValue::Float(1000.0)),
    (json!(true), DefaultValue::Boolean(true)),
    (json!("False"), DefaultValue::Boolean(false)),
    (json!({}), DefaultValue::DefaultConstruct),
    (json!("{}"), DefaultValue::DefaultConstruct),
    (json!("abc"), DefaultValue::RawLiteral("abc".to_string())),
    (json!("NaN"), DefaultValue::RawLiteral("NaN".to_string())),
    (json!([]), DefaultValue::RawLiteral("[]".to_string())),
  ];
  for (input, expected) in cases {
    assert_eq!(DefaultValue::resolve(&input, false), expected, "failed for input {input}");
  }
}

#[test]
fn test_enum_default_keeps_literal_text() {
  let cases = [
    (json!("abc"), "abc"),
    (json!(5), "5"),
    (json!("True"), "True"),
  ];
  for (input, expected) in cases {
    assert_eq!(
      DefaultValue::resolve(&input, true),
      DefaultValue::EnumMember(expected.to_string()),
      "failed for input {input}"
    );
  }
}

#[test]
fn test_default_serializes_tagged() {
  let value = serde_json::to_value(DefaultValue::Integer(5)).unwrap();
  assert_eq!(value, json!({ "kind": "integer", "value": 5 }));

  let value = serde_json::to_value(DefaultValue::DefaultConstruct).unwrap();
  assert_eq!(value, json!({ "kind": "default_construct" }));
}
