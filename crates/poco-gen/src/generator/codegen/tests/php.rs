use crate::generator::{
  codegen::Dialect,
  tests::support::{assert_contains, assert_not_contains, build_model, render},
};

#[test]
fn test_enum_and_class_layout() {
  let model = build_model(
    &[(
      "enum.json",
      r#"{ "type": "object", "properties": { "foo": { "type": "object", "enum": ["one", "2two2", "Three_ _third_"] } } }"#,
    )],
    "enum.json",
  );
  let code = render(Dialect::Php, &model);

  let expected = "\
<?php
/**
 * Generated by poco-gen. Changes to this file will be lost when it is regenerated.
 */

namespace generated;

final class Foo
{
    const One = 'One';
    const _2two2 = '_2two2';
    const Three__third_ = 'Three__third_';
}

class Enum
{
    /**
     * @var Foo
     */
    public $foo;
}
";
  assert_eq!(code, expected);
}

#[test]
fn test_type_tags() {
  let model = build_model(
    &[
      (
        "types.json",
        r#"{
          "title": "Types",
          "properties": {
            "flag": { "type": "boolean", "default": true },
            "count": { "type": "integer" },
            "big": { "type": "integer", "format": "int64" },
            "ratio": { "type": "number" },
            "name": { "type": "string", "description": "Display name" },
            "extra": {},
            "scores": { "type": "array", "items": { "type": "array", "items": { "type": "number" } } },
            "owner": { "$ref": "owner" }
          }
        }"#,
      ),
      ("owner.json", r#"{ "title": "Owner", "csharpType": "Acme.People.Owner" }"#),
    ],
    "types.json",
  );
  let code = render(Dialect::Php, &model);

  let cases = [
    ("     * @var boolean\n     */\n    public $flag;", "boolean"),
    ("     * @var integer\n     */\n    public $count;", "integer"),
    ("     * @var integer\n     */\n    public $big;", "long integer"),
    ("     * @var float\n     */\n    public $ratio;", "float"),
    ("     * Display name\n     *\n     * @var string\n", "described string"),
    ("     * @var mixed\n", "untyped"),
    ("     * @var float[][]\n", "nested list"),
    ("     * @var \\Acme\\People\\Owner\n", "foreign class"),
  ];
  for (expected, context) in cases {
    assert_contains(&code, expected, context);
  }
  assert_not_contains(&code, "function __construct", "constructor");
}

#[test]
fn test_namespaces_and_inheritance() {
  let model = build_model(
    &[
      (
        "dog.json",
        r#"{
          "title": "Dog",
          "csharpType": "Zoo.Animals.Dog",
          "extends": "animal",
          "csharpInterfaces": ["IPet", "Zoo.Contracts.ITagged"],
          "properties": { "size": { "enum": ["small", "extra large"] } }
        }"#,
      ),
      ("animal.json", r#"{ "title": "Animal", "csharpType": "Zoo.Animals.Animal" }"#),
    ],
    "dog.json",
  );
  let code = render(Dialect::Php, &model);

  let cases = [
    ("namespace Zoo\\Animals;\n", "namespace declaration"),
    (
      "class Dog extends Animal implements IPet, \\Zoo\\Contracts\\ITagged\n",
      "class header",
    ),
    ("    const ExtraLarge = 'ExtraLarge';\n", "enum constant"),
  ];
  for (expected, context) in cases {
    assert_contains(&code, expected, context);
  }
}

#[test]
fn test_constraints_are_not_rendered() {
  let model = build_model(
    &[(
      "account.json",
      r#"{ "title": "Account", "properties": { "code": { "type": "string", "required": true, "maxLength": 10 } } }"#,
    )],
    "account.json",
  );
  let code = render(Dialect::Php, &model);

  for input in ["[Required]", "MaxLength", "DataAnnotations"] {
    assert_not_contains(&code, input, "annotation");
  }
  assert_contains(&code, "public $code;", "property");
}
