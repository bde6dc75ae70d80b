//! CLI argument definitions for the open-data toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "odt",
    version,
    about = "Open-data CSV toolkit - discover, detect and select",
    long_about = "Work with CSV resources published on open-data portals.\n\n\
                  Lists CSV links on a portal page, locates the header row\n\
                  inside noisy CSV files, and extracts a validated subset of\n\
                  columns as JSON or delimited lines."
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
    /// List CSV links found on an open-data portal page.
    List(ListArgs),

    /// Detect and print the header row of CSV files.
    Detect(DetectArgs),

    /// Select validated columns from CSV files.
    Select(SelectArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Open-data portal page URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output field delimiter.
    #[arg(short = 'd', long = "delimiter", default_value = ",")]
    pub delimiter: String,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// CSV file paths (`-` reads standard input).
    #[arg(value_name = "CSVPATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output field delimiter.
    #[arg(short = 'd', long = "delimiter", default_value = ",")]
    pub delimiter: String,

    /// Code page for decoding the input (e.g. shift_jis, cp932).
    #[arg(long = "encoding", value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Header hint: `[<lines>][:<matchers>]`, e.g. `1-5:Name,*B`.
    #[arg(long = "hint", value_name = "HINT")]
    pub hint: Option<String>,
}

#[derive(Parser)]
pub struct SelectArgs {
    /// CSV file paths (`-` reads standard input).
    #[arg(value_name = "CSVPATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output field delimiter.
    #[arg(short = 'd', long = "delimiter", default_value = ",")]
    pub delimiter: String,

    /// Code page for decoding the input (e.g. shift_jis, cp932).
    #[arg(long = "encoding", value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Record id prefix (default: the file stem).
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Header hint: `[<lines>][:<matchers>]`; matchers drive which
    /// columns are selected.
    #[arg(long = "hint", value_name = "HINT")]
    pub hint: Option<String>,

    /// Comma-separated column type filters (`int`, `float`, empty = any).
    #[arg(long = "type", value_name = "TYPES")]
    pub types: Option<String>,

    /// Drop records with empty content in selected columns.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Emit delimited lines instead of the JSON dump.
    #[arg(long = "csv")]
    pub csv: bool,
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
