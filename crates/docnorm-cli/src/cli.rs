//! CLI argument definitions for the `docnorm` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use docnorm_standards::PhoneStyle;

#[derive(Parser)]
#[command(
    name = "docnorm",
    version,
    about = "Normalize immigration-form extraction results",
    long_about = "Normalize the output of a document-extraction service.\n\n\
                  Infers the issuing country, rewrites dates and phone numbers in that\n\
                  country's format, flags critical checkbox answers and extracts\n\
                  family-member tables."
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
    /// Normalize one extraction result JSON file.
    Process(ProcessArgs),

    /// List the countries in the locale rule table.
    Countries(CountriesArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Extraction result JSON file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Locale rule table JSON file (default: built-in table).
    #[arg(long = "rules", value_name = "RULES")]
    pub rules: Option<PathBuf>,

    /// Processing options JSON file.
    #[arg(long = "options", value_name = "OPTIONS")]
    pub options: Option<PathBuf>,

    /// Start from the strict thresholds instead of the defaults.
    ///
    /// Cannot be combined with `--options`.
    #[arg(long = "strict", conflicts_with = "options")]
    pub strict: bool,

    /// Accept family tables that carry unrelated extra columns.
    #[arg(long = "superset-family-tables")]
    pub superset_family_tables: bool,

    /// Read written dates (e.g. "15 Jan 1990") before formatting.
    ///
    /// By default only ISO `yyyy-MM-dd` values are reformatted.
    #[arg(long = "lenient-dates")]
    pub lenient_dates: bool,

    /// Render every phone number in this style instead of the country's.
    #[arg(long = "phone-style", value_enum)]
    pub phone_style: Option<PhoneStyleArg>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct CountriesArgs {
    /// Locale rule table JSON file (default: built-in table).
    #[arg(long = "rules", value_name = "RULES")]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PhoneStyleArg {
    Local,
    International,
    Spaced,
}

impl From<PhoneStyleArg> for PhoneStyle {
    fn from(arg: PhoneStyleArg) -> Self {
        match arg {
            PhoneStyleArg::Local => PhoneStyle::Local,
            PhoneStyleArg::International => PhoneStyle::International,
            PhoneStyleArg::Spaced => PhoneStyle::Spaced,
        }
    }
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
