use crate::generator::{
  codegen::Dialect,
  tests::support::{assert_contains, assert_not_contains, build_model, render},
};

const ENUM_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "foo": { "type": "object", "enum": ["one", "2two2", "Three_ _third_"] }
  }
}"#;

#[test]
fn test_enum_property_renders_enum_and_accessors() {
  let model = build_model(&[("enum.json", ENUM_SCHEMA)], "enum.json");
  let code = render(Dialect::CSharp, &model);

  let expected = "\
// <auto-generated>
//     Generated by poco-gen. Changes to this file will be lost when it is regenerated.
// </auto-generated>

namespace generated
{
    using System;

    public enum Foo
    {
        One,
        _2two2,
        Three__third_,
    }

    public class Enum
    {
        private Foo _foo;

        public virtual Foo Foo
        {
            get { return _foo; }
            set { _foo = value; }
        }
    }
}
";
  assert_eq!(code, expected);
}

#[test]
fn test_constructor_assigns_defaults() {
  let model = build_model(
    &[(
      "defaults.json",
      r#"{
        "title": "Settings",
        "properties": {
          "child": { "type": "object", "csharpType": "Acme.Child", "default": "{}" },
          "retries": { "type": "integer", "default": 5 },
          "limit": { "type": "integer", "format": "int64", "default": 9 },
          "scale": { "type": "number", "format": "float", "default": 1.5 },
          "ratio": { "type": "number", "default": 2 },
          "verbose": { "type": "boolean", "default": false },
          "mode": { "type": "string", "enum": ["abc", "xyz"], "default": "ABC" },
          "greeting": { "type": "string", "default": "say \"hi\"" },
          "tags": { "type": "array", "items": { "type": "string" }, "default": "{}" }
        }
      }"#,
    )],
    "defaults.json",
  );
  let code = render(Dialect::CSharp, &model);

  let cases = [
    ("        public Settings()\n        {\n", "constructor"),
    ("_child = new Child();", "default construction"),
    ("_retries = 5;", "integer literal"),
    ("_limit = 9L;", "long literal"),
    ("_scale = 1.5f;", "float literal"),
    ("_ratio = 2;", "integer default on a double"),
    ("_verbose = false;", "boolean literal"),
    (
      "_mode = (Mode)System.Enum.Parse(typeof(Mode), \"Abc\", true);",
      "case-insensitive enum parse",
    ),
    ("_greeting = \"say \\\"hi\\\"\";", "escaped string literal"),
    ("_tags = new List<string>();", "list construction"),
    ("using System.Collections.Generic;", "collections import"),
    ("using Acme;", "custom type import"),
  ];
  for (expected, context) in cases {
    assert_contains(&code, expected, context);
  }
}

#[test]
fn test_no_constructor_without_defaults() {
  let model = build_model(
    &[("plain.json", r#"{ "title": "Plain", "properties": { "name": { "type": "string" } } }"#)],
    "plain.json",
  );
  let code = render(Dialect::CSharp, &model);

  assert_not_contains(&code, "public Plain()", "constructor");
  assert_not_contains(&code, "System.Collections.Generic", "collections import");
  assert_contains(&code, "private string _name;", "backing field");
  assert_contains(&code, "public virtual string Name", "property");
}

#[test]
fn test_bases_and_docs() {
  let model = build_model(
    &[
      (
        "dog.json",
        r#"{
          "title": "Dog",
          "description": "A good dog.\\nVery <good>.",
          "extends": "animal",
          "csharpInterfaces": ["IPet", "ITagged"],
          "properties": {
            "names": { "type": "array", "items": { "type": "array", "items": { "type": "string" } }, "description": "Known names" }
          }
        }"#,
      ),
      ("animal.json", r#"{ "title": "Animal" }"#),
    ],
    "dog.json",
  );
  let code = render(Dialect::CSharp, &model);

  let cases = [
    ("    public class Dog : Animal, IPet, ITagged\n", "base list"),
    ("    /// <summary>\n    /// A good dog.\n    /// Very &lt;good&gt;.\n    /// </summary>\n", "class docs"),
    ("        /// Known names\n", "property docs"),
    ("private List<List<string>> _names;", "nested list type"),
  ];
  for (expected, context) in cases {
    assert_contains(&code, expected, context);
  }
}

#[test]
fn test_rendering_is_deterministic() {
  let model = build_model(&[("enum.json", ENUM_SCHEMA)], "enum.json");
  assert_eq!(render(Dialect::CSharp, &model), render(Dialect::CSharp, &model));
}

#[test]
fn test_constraints_render_as_data_annotations() {
  let model = build_model(
    &[(
      "account.json",
      r#"{
        "title": "Account",
        "required": ["code"],
        "properties": {
          "code": { "type": "string", "maxLength": 10, "pattern": "^\\d+\"x$" },
          "age": { "type": "integer", "minimum": 1 },
          "ratio": { "type": "number", "minimum": -0.5, "maximum": 0.5 },
          "plain": { "type": "string" }
        }
      }"#,
    )],
    "account.json",
  );
  let code = render(Dialect::CSharp, &model);

  let cases = [
    "    using System.ComponentModel.DataAnnotations;\n",
    "        [Required]\n        [MaxLength(10)]\n        [RegularExpression(@\"^\\d+\"\"x$\")]\n        public virtual string Code\n",
    "        [Range(1.0, double.MaxValue)]\n        public virtual int Age\n",
    "        [Range(-0.5, 0.5)]\n        public virtual double Ratio\n",
    "\n\n        public virtual string Plain\n",
  ];
  for input in cases {
    assert_contains(&code, input, "annotation");
  }
}

#[test]
fn test_unconstrained_class_skips_annotations_namespace() {
  let model = build_model(&[("enum.json", ENUM_SCHEMA)], "enum.json");
  let code = render(Dialect::CSharp, &model);
  assert_not_contains(&code, "DataAnnotations", "using");
}

#[test]
fn test_large_integer_default_renders_as_long() {
  let model = build_model(
    &[(
      "quota.json",
      r#"{ "title": "Quota", "properties": { "bytes": { "type": "integer", "default": 3000000000 } } }"#,
    )],
    "quota.json",
  );
  let code = render(Dialect::CSharp, &model);

  assert_contains(&code, "private long _bytes;", "field");
  assert_contains(&code, "_bytes = 3000000000L;", "initializer");
  assert_contains(&code, "public virtual long Bytes", "property");
}
