use crate::generator::naming::identifiers::{
  capitalize, lower_first, sanitize_identifier, split_qualified_name, type_name_from_stem,
};

#[test]
fn test_sanitize_enum_members() {
  let cases = [
    ("one", "One"),
    ("2two2", "_2two2"),
    ("Three_ _third_", "Three__third_"),
    ("already Pascal", "AlreadyPascal"),
    ("two  spaces", "TwoSpaces"),
    ("tab\tseparated", "TabSeparated"),
    ("_private", "_private"),
    ("-negative", "_-negative"),
    ("", "_"),
  ];
  for (input, expected) in cases {
    assert_eq!(sanitize_identifier(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_capitalize_and_lower_first() {
  let cases = [("foo", "Foo", "foo"), ("Foo", "Foo", "foo"), ("", "", ""), ("éclair", "Éclair", "éclair")];
  for (input, upper, lower) in cases {
    assert_eq!(capitalize(input), upper, "capitalize failed for {input:?}");
    assert_eq!(lower_first(input), lower, "lower_first failed for {input:?}");
  }
}

#[test]
fn test_split_qualified_name() {
  let cases = [
    ("Acme.Models.Person", Some((Some("Acme.Models"), "Person"))),
    ("Person", Some((None, "Person"))),
    ("_Internal.Thing", Some((Some("_Internal"), "Thing"))),
    ("Acme.", None),
    (".Person", None),
    ("Acme..Person", None),
    ("Acme Models.Person", None),
    ("1Acme.Person", None),
    ("", None),
  ];
  for (input, expected) in cases {
    assert_eq!(split_qualified_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_type_name_from_stem() {
  let cases = [
    ("person", "Person"),
    ("order-line", "OrderLine"),
    ("v2.schema", "V2Schema"),
    ("2fa", "_2fa"),
    ("", "DefaultClassName"),
    ("--", "DefaultClassName"),
  ];
  for (input, expected) in cases {
    assert_eq!(type_name_from_stem(input), expected, "failed for input {input:?}");
  }
}
