use serde_json::json;

use crate::generator::ast::{ClassDef, CodeModel, EnumDef, NamedType, Primitive, PropertyDef, TypeDef, TypeRef};

fn status_enum() -> EnumDef {
  EnumDef {
    name: "Status".to_string(),
    docs: None,
    members: vec!["Active".to_string(), "_2fa".to_string(), "OnHold".to_string()],
  }
}

#[test]
fn test_enum_member_matching_ignores_case() {
  let def = status_enum();
  let cases = [
    ("active", Some("Active")),
    ("ACTIVE", Some("Active")),
    ("2fa", Some("_2fa")),
    ("on hold", Some("OnHold")),
    ("missing", None),
  ];
  for (input, expected) in cases {
    assert_eq!(def.member_matching(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_named_type_reached_through_lists() {
  let nested = TypeRef::list_of(TypeRef::list_of(TypeRef::named("Acme", "Person")));
  assert_eq!(nested.named_type(), Some(&NamedType::new("Acme", "Person")));
  assert!(nested.is_list());
  assert_eq!(TypeRef::from(Primitive::String).named_type(), None);
}

#[test]
fn test_qualified_names() {
  assert_eq!(NamedType::new("Acme.Models", "Person").qualified(), "Acme.Models.Person");
  assert_eq!(NamedType::new("", "Person").qualified(), "Person");
}

#[test]
fn test_class_bases_put_extends_first() {
  let class = ClassDef::builder()
    .name("Dog".to_string())
    .namespace("zoo".to_string())
    .base(NamedType::new("zoo", "Animal"))
    .interfaces(vec![NamedType::new("zoo", "IPet"), NamedType::new("zoo", "ITagged")])
    .build();

  let names: Vec<&str> = class.bases().map(|base| base.name.as_str()).collect();
  assert_eq!(names, ["Animal", "IPet", "ITagged"]);
}

#[test]
fn test_model_serializes_as_tagged_variants() {
  let class = ClassDef::builder()
    .name("Person".to_string())
    .namespace("generated".to_string())
    .properties(vec![
      PropertyDef::builder()
        .name("Tags".to_string())
        .type_ref(TypeRef::list_of(Primitive::String.into()))
        .build(),
    ])
    .build();
  let model = CodeModel {
    namespace: "generated".to_string(),
    imports: Default::default(),
    types: vec![TypeDef::Enum(status_enum()), TypeDef::Class(class)],
  };

  let value = serde_json::to_value(&model).unwrap();
  assert_eq!(value["types"][0]["kind"], json!("enum"));
  assert_eq!(value["types"][1]["kind"], json!("class"));
  assert_eq!(
    value["types"][1]["properties"][0]["type_ref"],
    json!({ "kind": "list", "of": { "kind": "primitive", "of": "string" } })
  );

  let round_trip: CodeModel = serde_json::from_value(value).unwrap();
  assert_eq!(round_trip, model);
  assert_eq!(model.primary_name(), Some("Person"));
}
