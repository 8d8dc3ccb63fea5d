//! CLI argument definitions for the chart converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "karte",
    version,
    about = "Convert copy-pasted clinical chart text into per-visit JSON records",
    long_about = "Convert copy-pasted clinical chart text into per-visit JSON records.\n\n\
                  Chart text is split into S/O/A/P/F/サ sections per visit, duplicate\n\
                  pastes are merged, and visits are ordered by date and time."
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

    /// Allow dates and departments to appear in logs.
    ///
    /// Off by default: chart records are patient data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert chart text into JSON records.
    Convert(ConvertArgs),

    /// Combine previously converted JSON files into one ordered list of visits.
    Merge(MergeArgs),

    /// Remove clinician and insurance fields from entry header lines.
    Anonymize(AnonymizeArgs),

    /// List the recognised section codes and their output fields.
    Sections,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Chart text files, joined with a newline in the given order.
    /// Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Write JSON to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit one record per parsed section without merging visits.
    #[arg(long = "flat")]
    pub flat: bool,

    /// Fail when a date or time would not sort chronologically instead of
    /// warning. Only visit records are sorted, so this excludes `--flat`.
    #[arg(long = "strict", conflicts_with = "flat")]
    pub strict: bool,

    /// Print a per-visit summary table to stderr.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// JSON files produced by `convert` (visit or flat records).
    /// Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Write JSON to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Fail when a date or time would not sort chronologically instead of
    /// warning.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print a per-visit summary table to stderr.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct AnonymizeArgs {
    /// Chart text file. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Write the anonymized text to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
