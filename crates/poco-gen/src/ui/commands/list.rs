use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{
    resolver::{FileSource, NoDirectories, ResolveOptions, ResolveSession},
    schema_graph::SchemaGraph,
  },
  ui::{Colors, colors::comfy, term_width},
};

/// One line of the schema listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SchemaRow {
  id: String,
  type_name: String,
  namespace: String,
  dependencies: usize,
}

/// Rows in resolution order, so dependencies are listed before their dependents.
fn schema_rows(graph: &SchemaGraph) -> Vec<SchemaRow> {
  graph
    .documents()
    .map(|document| SchemaRow {
      id: document.id.as_str().to_string(),
      type_name: document.title.clone(),
      namespace: document.namespace.clone(),
      dependencies: graph.dependencies(&document.id).count(),
    })
    .collect()
}

pub fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let mut session = ResolveSession::new(&FileSource, &NoDirectories, ResolveOptions::default());
  session.resolve_path(input)?;
  let rows = schema_rows(session.graph());

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["SCHEMA ID", "TYPE", "NAMESPACE", "DEPS"] {
    header.add_cell(Cell::new(title).fg(comfy(colors.label())));
  }
  table.set_header(header);

  for row in rows {
    let mut line = Row::new();
    line.add_cell(Cell::new(row.id).fg(comfy(colors.primary())));
    line.add_cell(
      Cell::new(row.type_name)
        .fg(comfy(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    line.add_cell(Cell::new(row.namespace).fg(comfy(colors.info())));
    line.add_cell(
      Cell::new(row.dependencies)
        .fg(comfy(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(line);
  }

  println!("{table}");

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::tests::support::resolve_graph;

  #[test]
  fn test_schema_rows_follow_resolution_order() {
    let graph = resolve_graph(
      &[
        (
          "order.json",
          r#"{ "title": "Order", "properties": {
            "customer": { "$ref": "customer" },
            "lines": { "type": "array", "items": { "type": "object", "properties": { "sku": { "type": "string" } } } }
          } }"#,
        ),
        (
          "customer.json",
          r#"{ "csharpType": "Shop.Customer", "properties": { "name": { "type": "string" } } }"#,
        ),
      ],
      "order.json",
    );

    let rows: Vec<(String, String, usize)> = schema_rows(&graph)
      .into_iter()
      .map(|row| (row.type_name, row.namespace, row.dependencies))
      .collect();
    assert_eq!(
      rows,
      [
        ("Customer".to_string(), "Shop".to_string(), 0),
        ("Lines".to_string(), "generated".to_string(), 0),
        ("Order".to_string(), "generated".to_string(), 2),
      ]
    );
  }
}
