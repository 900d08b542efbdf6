//! CLI argument definitions for the document classifier.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "doctype",
    version,
    about = "Classify documents against a catalog of document types",
    long_about = "Score a parsed document against every known document type.\n\n\
                  Reports the ranked candidates, a calibrated confidence, and whether\n\
                  the decision is too ambiguous to trust without review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify one document (JSON).
    Classify(ClassifyArgs),

    /// List the document types in a catalog.
    Types(TypesArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Path to the document JSON file.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Type catalog: a JSON file or a directory of JSON files
    /// (default: the built-in catalog).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run the consistency re-ranking pass.
    #[arg(long = "refine")]
    pub refine: bool,

    /// Fall back to the built-in catalog when the catalog cannot be loaded (default).
    #[arg(long = "builtin-fallback", overrides_with = "no_builtin_fallback")]
    pub builtin_fallback: bool,

    /// Fail instead of falling back to the built-in catalog.
    #[arg(long = "no-builtin-fallback", overrides_with = "builtin_fallback")]
    pub no_builtin_fallback: bool,

    /// Persist the result as JSON in this directory.
    #[arg(long = "store", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Give up after this many milliseconds.
    #[arg(long = "timeout-ms", value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Number of candidates to show.
    #[arg(long = "top", value_name = "N", default_value_t = 5)]
    pub top: usize,
}

impl ClassifyArgs {
    /// Whether built-in fallback is enabled; on unless explicitly disabled.
    pub fn use_builtin_fallback(&self) -> bool {
        !self.no_builtin_fallback
    }
}

#[derive(Parser)]
pub struct TypesArgs {
    /// Type catalog: a JSON file or a directory of JSON files
    /// (default: the built-in catalog).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
