use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::{codegen::Dialect, resolver::DEFAULT_NAMESPACE};

#[derive(Parser, Debug)]
#[command(name = "poco-gen")]
#[command(author, version, about = "JSON schema to C# and PHP class generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Inspect the schema graph reachable from a root document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate one source file per schema document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the root JSON schema document, or `-` to read one schema from stdin
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory the generated files are written to
  #[arg(short, long, value_name = "DIR", default_value = ".")]
  pub output: PathBuf,

  /// Output language
  #[arg(short, long, value_enum, default_value = "csharp")]
  pub dialect: Dialect,

  /// Namespace for types without a csharpType override
  #[arg(short, long, value_name = "NAMESPACE", default_value = DEFAULT_NAMESPACE)]
  pub namespace: String,

  /// Create a directory per namespace and place each file in its namespace directory
  #[arg(long, default_value_t = false)]
  pub create_dirs: bool,

  /// When resolution fails, still write the documents resolved before the failure
  #[arg(long, default_value_t = false)]
  pub emit_partial: bool,

  /// Enable verbose output with per-document progress and every warning
  #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every schema document reachable from the root
  Schemas {
    /// Path to the root JSON schema document
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
