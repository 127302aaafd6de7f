use itertools::Itertools;

use super::{Dialect, Emitter, GENERATED_BANNER, writer::CodeWriter};
use crate::{
  generator::{
    ast::{ClassDef, CodeModel, EnumDef, NamedType, Primitive, PropertyDef, TypeDef, TypeRef},
    errors::GenerateError,
    naming::identifiers::lower_first,
  },
  utils::comment_lines,
};

const INDENT: &str = "    ";

/// PHP classes with public fields and `@var` docblocks.
///
/// Enums become final classes of string constants whose value is the member name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpEmitter;

impl Emitter for PhpEmitter {
  fn dialect(&self) -> Dialect {
    Dialect::Php
  }

  fn render(&self, model: &CodeModel) -> Result<String, GenerateError> {
    let mut w = CodeWriter::new(INDENT);
    w.line("<?php");
    w.line("/**");
    w.line(format!(" * {GENERATED_BANNER}"));
    w.line(" */");

    if !model.namespace.is_empty() {
      w.blank();
      w.line(format!("namespace {};", namespace_name(&model.namespace)));
    }

    for ty in &model.types {
      w.blank();
      match ty {
        TypeDef::Enum(def) => render_enum(&mut w, def),
        TypeDef::Class(def) => render_class(&mut w, model, def),
      }
    }

    Ok(w.finish())
  }
}

fn namespace_name(namespace: &str) -> String {
  namespace.replace('.', "\\")
}

fn render_docblock(w: &mut CodeWriter, docs: Option<&str>, tags: &[String]) {
  if docs.is_none() && tags.is_empty() {
    return;
  }
  w.line("/**");
  if let Some(docs) = docs {
    w.lines(comment_lines(&docs.replace("*/", "*\\/"), " * "));
    if !tags.is_empty() {
      w.line(" *");
    }
  }
  for tag in tags {
    w.line(format!(" * {tag}"));
  }
  w.line(" */");
}

fn render_enum(w: &mut CodeWriter, def: &EnumDef) {
  render_docblock(w, def.docs.as_deref(), &[]);
  w.braced(format!("final class {}", def.name), |w| {
    for member in &def.members {
      w.line(format!("const {member} = {};", string_literal(member)));
    }
  });
}

fn render_class(w: &mut CodeWriter, model: &CodeModel, def: &ClassDef) {
  render_docblock(w, def.docs.as_deref(), &[]);

  let mut header = format!("class {}", def.name);
  if let Some(base) = &def.base {
    header.push_str(&format!(" extends {}", class_name(model, base)));
  }
  if !def.interfaces.is_empty() {
    let interfaces = def.interfaces.iter().map(|named| class_name(model, named)).join(", ");
    header.push_str(&format!(" implements {interfaces}"));
  }

  w.braced(header, |w| {
    for (index, property) in def.properties.iter().enumerate() {
      if index > 0 {
        w.blank();
      }
      render_field(w, model, property);
    }
  });
}

fn render_field(w: &mut CodeWriter, model: &CodeModel, property: &PropertyDef) {
  let tag = format!("@var {}", type_tag(model, &property.type_ref));
  render_docblock(w, property.docs.as_deref(), &[tag]);
  w.line(format!("public ${};", lower_first(&property.name)));
}

/// Doc-comment type tag: scalar names, `T[]` for lists, class names otherwise.
fn type_tag(model: &CodeModel, type_ref: &TypeRef) -> String {
  match type_ref {
    TypeRef::Primitive(primitive) => primitive_tag(*primitive).to_string(),
    TypeRef::List(inner) => format!("{}[]", type_tag(model, inner)),
    TypeRef::Named(named) => class_name(model, named),
  }
}

fn primitive_tag(primitive: Primitive) -> &'static str {
  match primitive {
    Primitive::Boolean => "boolean",
    Primitive::Int32 | Primitive::Int64 => "integer",
    Primitive::Float | Primitive::Double => "float",
    Primitive::String => "string",
    Primitive::Object => "mixed",
  }
}

/// Unqualified inside the model's namespace, fully qualified elsewhere.
fn class_name(model: &CodeModel, named: &NamedType) -> String {
  if named.namespace == model.namespace || named.namespace.is_empty() {
    named.name.clone()
  } else {
    format!("\\{}\\{}", namespace_name(&named.namespace), named.name)
  }
}

fn string_literal(text: &str) -> String {
  format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}
