use itertools::Itertools;

use super::{Dialect, Emitter, GENERATED_BANNER, writer::CodeWriter};
use crate::{
  generator::{
    ast::{ClassDef, CodeModel, Constraint, DefaultValue, EnumDef, Initializer, Primitive, PropertyDef, TypeDef, TypeRef},
    errors::GenerateError,
    naming::identifiers::{lower_first, sanitize_identifier},
  },
  utils::comment_lines,
};

const INDENT: &str = "    ";
const SYSTEM_NAMESPACE: &str = "System";
const COLLECTIONS_NAMESPACE: &str = "System.Collections.Generic";
const ANNOTATIONS_NAMESPACE: &str = "System.ComponentModel.DataAnnotations";

/// Plain C# classes with backing fields and get/set properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpEmitter;

impl Emitter for CSharpEmitter {
  fn dialect(&self) -> Dialect {
    Dialect::CSharp
  }

  fn render(&self, model: &CodeModel) -> Result<String, GenerateError> {
    let mut w = CodeWriter::new(INDENT);
    w.line("// <auto-generated>");
    w.line(format!("//     {GENERATED_BANNER}"));
    w.line("// </auto-generated>");
    w.blank();

    w.braced(format!("namespace {}", model.namespace), |w| {
      for namespace in usings(model) {
        w.line(format!("using {namespace};"));
      }

      for ty in &model.types {
        w.blank();
        match ty {
          TypeDef::Enum(def) => render_enum(w, def),
          TypeDef::Class(def) => render_class(w, model, def),
        }
      }
    });

    Ok(w.finish())
  }
}

fn usings(model: &CodeModel) -> Vec<&str> {
  let properties = || model.classes().flat_map(|class| &class.properties);
  let uses_lists = properties().any(|property| property.type_ref.is_list());
  let uses_annotations = properties().any(|property| !property.constraints.is_empty());

  std::iter::once(SYSTEM_NAMESPACE)
    .chain(uses_lists.then_some(COLLECTIONS_NAMESPACE))
    .chain(uses_annotations.then_some(ANNOTATIONS_NAMESPACE))
    .chain(model.imports.iter().map(String::as_str))
    .unique()
    .collect()
}

fn render_docs(w: &mut CodeWriter, docs: Option<&str>) {
  let Some(docs) = docs else {
    return;
  };
  w.line("/// <summary>");
  w.lines(comment_lines(&escape_xml(docs), "/// "));
  w.line("/// </summary>");
}

fn render_enum(w: &mut CodeWriter, def: &EnumDef) {
  render_docs(w, def.docs.as_deref());
  w.braced(format!("public enum {}", def.name), |w| {
    for member in &def.members {
      w.line(format!("{member},"));
    }
  });
}

fn render_class(w: &mut CodeWriter, model: &CodeModel, def: &ClassDef) {
  render_docs(w, def.docs.as_deref());

  let bases = def.bases().map(|base| base.name.as_str()).join(", ");
  let header = if bases.is_empty() {
    format!("public class {}", def.name)
  } else {
    format!("public class {} : {bases}", def.name)
  };

  w.braced(header, |w| {
    for property in &def.properties {
      w.line(format!("private {} {};", type_name(&property.type_ref), field_name(&property.name)));
    }

    if let Some(initializers) = &def.initializers {
      w.blank();
      w.braced(format!("public {}()", def.name), |w| {
        for initializer in initializers {
          w.line(format!(
            "{} = {};",
            field_name(&initializer.property),
            default_expression(model, initializer)
          ));
        }
      });
    }

    for property in &def.properties {
      w.blank();
      render_property(w, property);
    }
  });
}

fn render_property(w: &mut CodeWriter, property: &PropertyDef) {
  let field = field_name(&property.name);
  render_docs(w, property.docs.as_deref());
  for constraint in &property.constraints {
    w.line(attribute(constraint));
  }
  let header = format!("public virtual {} {}", type_name(&property.type_ref), property.name);
  w.braced(header, |w| {
    w.line(format!("get {{ return {field}; }}"));
    w.line(format!("set {{ {field} = value; }}"));
  });
}

/// DataAnnotations attribute for one validation constraint.
fn attribute(constraint: &Constraint) -> String {
  match constraint {
    Constraint::Required => "[Required]".to_string(),
    Constraint::MinLength { value } => format!("[MinLength({value})]"),
    Constraint::MaxLength { value } => format!("[MaxLength({value})]"),
    Constraint::Range { minimum, maximum } => {
      let bound = |value: Option<f64>, missing: &str| value.map_or_else(|| missing.to_string(), |v| format!("{v:?}"));
      format!(
        "[Range({}, {})]",
        bound(*minimum, "double.MinValue"),
        bound(*maximum, "double.MaxValue")
      )
    }
    Constraint::Pattern { regex } => format!("[RegularExpression(@\"{}\")]", regex.replace('"', "\"\"")),
  }
}

fn field_name(property: &str) -> String {
  format!("_{}", lower_first(property))
}

pub(super) fn type_name(type_ref: &TypeRef) -> String {
  match type_ref {
    TypeRef::Primitive(primitive) => primitive_name(*primitive).to_string(),
    TypeRef::List(inner) => format!("List<{}>", type_name(inner)),
    TypeRef::Named(named) => named.name.clone(),
  }
}

fn primitive_name(primitive: Primitive) -> &'static str {
  match primitive {
    Primitive::Boolean => "bool",
    Primitive::Int32 => "int",
    Primitive::Int64 => "long",
    Primitive::Float => "float",
    Primitive::Double => "double",
    Primitive::String => "string",
    Primitive::Object => "object",
  }
}

fn default_expression(model: &CodeModel, initializer: &Initializer) -> String {
  let declared = type_name(&initializer.type_ref);
  match &initializer.value {
    DefaultValue::EnumMember(text) => {
      let member = model
        .find_enum(&declared)
        .and_then(|def| def.member_matching(text))
        .map_or_else(|| sanitize_identifier(text), str::to_string);
      format!("({declared})System.Enum.Parse(typeof({declared}), {}, true)", string_literal(&member))
    }
    DefaultValue::Integer(value) if initializer.type_ref.as_primitive() == Some(Primitive::Int64) => format!("{value}L"),
    DefaultValue::Integer(value) => value.to_string(),
    DefaultValue::Float(value) if initializer.type_ref.as_primitive() == Some(Primitive::Float) => format!("{value:?}f"),
    DefaultValue::Float(value) => format!("{value:?}"),
    DefaultValue::Boolean(value) => value.to_string(),
    DefaultValue::DefaultConstruct => format!("new {declared}()"),
    DefaultValue::RawLiteral(text) => string_literal(text),
  }
}

fn string_literal(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + 2);
  out.push('"');
  for c in text.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      other => out.push(other),
    }
  }
  out.push('"');
  out
}

fn escape_xml(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
