use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use tokio::io::AsyncReadExt;

use crate::{
  generator::{
    codegen::Dialect,
    errors::GenerateError,
    metrics::GenerationStats,
    orchestrator::{GeneratedFile, GeneratedOutput, Orchestrator, Resolution},
    resolver::{FileSource, NamespaceDirectories, ResolveOptions},
    schema_graph::SchemaGraph,
    schema_id::root_url,
  },
  ui::{Colors, GenerateCommand},
};

/// Input path that reads the root schema from standard input.
const STDIN_INPUT: &str = "-";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub dialect: Dialect,
  pub namespace: String,
  pub create_dirs: bool,
  pub emit_partial: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      dialect,
      namespace,
      create_dirs,
      emit_partial,
      verbose,
      quiet,
    } = command;

    let namespace = namespace.trim().to_string();
    if !is_valid_namespace(&namespace) {
      anyhow::bail!("Invalid namespace '{namespace}': expected dotted identifiers (e.g., Acme.Models)");
    }
    if input.as_os_str().is_empty() {
      anyhow::bail!("Input path (-i) must not be empty");
    }

    Ok(Self {
      input,
      output,
      dialect,
      namespace,
      create_dirs,
      emit_partial,
      verbose,
      quiet,
    })
  }

  fn reads_stdin(&self) -> bool {
    self.input.as_os_str() == STDIN_INPUT
  }

  fn input_label(&self) -> String {
    if self.reads_stdin() {
      "standard input".to_string()
    } else {
      self.input.display().to_string()
    }
  }

  fn resolve_options(&self) -> ResolveOptions {
    ResolveOptions {
      namespace: self.namespace.clone(),
      create_dirs: self.create_dirs,
    }
  }

  fn create_orchestrator(&self) -> Orchestrator {
    Orchestrator::new(self.dialect, self.resolve_options())
  }

  async fn write_files(&self, files: &[GeneratedFile]) -> anyhow::Result<()> {
    for file in files {
      let path = self.output.join(&file.path);
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(&path, &file.code).await?;
    }
    Ok(())
  }
}

/// Empty, or identifiers separated by single dots.
fn is_valid_namespace(namespace: &str) -> bool {
  namespace.is_empty()
    || namespace.split('.').all(|segment| {
      segment.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Resolving schemas from: {}", self.config.input_label())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_documents(&self, graph: &SchemaGraph) {
    if !self.config.verbose || self.config.quiet || graph.is_empty() {
      return;
    }
    self.info(&format!("Resolved {} documents:", graph.len()).with(self.colors.primary()).to_string());
    for document in graph.documents() {
      println!(
        "              {} {}",
        document.nominal_type().qualified().with(self.colors.value()),
        document.id.to_string().with(self.colors.info())
      );
    }
  }

  fn log_generating(&self) {
    self.info(
      &format!("Generating {} sources...", self.config.dialect)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_partial(&self, error: &GenerateError) {
    eprintln!(
      "{} {}",
      "Error:".with(self.colors.accent()),
      error.to_string().with(self.colors.primary())
    );
    self.info(
      &"Emitting the documents resolved before the failure"
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Documents resolved:", stats.documents_resolved.to_string());
    self.stat("Types generated:", stats.types_generated.to_string());
    self.stat("", format!("{} classes", stats.classes_generated));
    self.stat("", format!("{} enums", stats.enums_generated));
    self.stat("Properties generated:", stats.properties_generated.to_string());
    self.stat("Files generated:", stats.files_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self, files: usize) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {files} {} files", self.config.dialect).with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  if config.reads_stdin() {
    let mut schema = String::new();
    tokio::io::stdin().read_to_string(&mut schema).await?;
    return generate_from_text(&config, &schema, colors).await;
  }

  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let root = root_url(&config.input)?;
  let dirs = NamespaceDirectories::new(&config.output);
  let orchestrator = config.create_orchestrator();

  let Resolution {
    graph,
    mut stats,
    failure,
  } = orchestrator.resolve(&root, &FileSource, &dirs);
  logger.log_documents(&graph);

  if let Some(error) = failure {
    if !config.emit_partial {
      return Err(error.into());
    }

    logger.log_partial(&error);
    let files = orchestrator.emit_partial(&graph, &mut stats);
    logger.print_statistics(&stats);
    logger.log_writing();
    config.write_files(&files).await?;
    return Err(error.into());
  }

  logger.log_generating();
  let files = orchestrator.emit(&graph, &mut stats)?;
  logger.print_statistics(&stats);
  logger.log_writing();
  config.write_files(&files).await?;

  logger.log_success(files.len());
  Ok(())
}

/// Generates from a single schema that arrived as text; relative references
/// are not followed and `--emit-partial` has nothing to salvage.
async fn generate_from_text(config: &GenerateConfig, schema: &str, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(config, colors);

  logger.log_loading();
  logger.log_generating();
  let GeneratedOutput { files, stats } = config.create_orchestrator().generate_from_str(schema)?;
  logger.print_statistics(&stats);
  logger.log_writing();
  config.write_files(&files).await?;

  logger.log_success(files.len());
  Ok(())
}
