//! CLI argument definitions for the HXL tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hxl",
    version,
    about = "Validate, count and tag HXL datasets",
    long_about = "Tools for datasets using the Humanitarian Exchange Language.\n\n\
                  Input is CSV with a row of hashtags (e.g. #org,#sector,#adm1) \
                  near the top. Input defaults to stdin and output to stdout."
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
    /// Validate a dataset against a JSON schema.
    Validate(ValidateArgs),

    /// Count combinations of values for a set of hashtags.
    Count(CountArgs),

    /// Add a hashtag row to a spreadsheet with text headers.
    Tag(TagArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Schema configuration (JSON).
    #[arg(short = 's', long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// HXL dataset to validate (default: stdin).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// How to report violations.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Write the report to a file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CountArgs {
    /// HXL dataset to read (default: stdin).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the counts (default: stdout).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Comma-separated hashtags to count; the leading '#' may be omitted.
    #[arg(
        short = 't',
        long = "tags",
        value_name = "TAG,TAG...",
        value_delimiter = ',',
        default_value = "loc,org,sector,adm1,adm2,adm3"
    )]
    pub tags: Vec<String>,

    /// Numeric hashtag to aggregate (sum, average, min, max).
    #[arg(short = 'a', long = "aggregate", value_name = "TAG")]
    pub aggregate: Option<String>,
}

#[derive(Args)]
pub struct TagArgs {
    /// Untagged CSV to read (default: stdin).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the tagged CSV (default: stdout).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Header mapping such as "Country Name=#country+name" (repeatable).
    #[arg(
        short = 'm',
        long = "map",
        value_name = "HEADER=TAG",
        required = true,
        value_parser = parse_mapping
    )]
    pub mappings: Vec<(String, String)>,

    /// Require the whole header to match instead of a substring.
    #[arg(long = "exact")]
    pub exact: bool,
}

/// Violation report formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    /// Table of violations plus a summary line.
    Table,
    /// JSON report document.
    Json,
    /// One `warn` log event per violation.
    Log,
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

/// Parse `HEADER=TAG`. The header may itself contain '='; the last one splits.
pub fn parse_mapping(value: &str) -> Result<(String, String), String> {
    let Some((header, tag)) = value.rsplit_once('=') else {
        return Err(format!("expected HEADER=TAG, got '{value}'"));
    };
    if header.trim().is_empty() {
        return Err(format!("empty header in '{value}'"));
    }
    Ok((header.to_string(), tag.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        assert_eq!(
            parse_mapping("Country Name=#country+name"),
            Ok(("Country Name".to_string(), "#country+name".to_string()))
        );
        assert_eq!(
            parse_mapping("a=b= #org").map(|(header, _)| header),
            Ok("a=b".to_string())
        );
        assert!(parse_mapping("Country Name").is_err());
        assert!(parse_mapping(" =#org").is_err());
    }

    #[test]
    fn test_count_defaults() {
        let cli = Cli::parse_from(["hxl", "count"]);
        let Command::Count(args) = cli.command else {
            panic!("expected count command");
        };
        assert_eq!(args.tags, ["loc", "org", "sector", "adm1", "adm2", "adm3"]);
        assert!(args.aggregate.is_none());
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from([
            "hxl",
            "validate",
            "--schema",
            "schema.json",
            "data.csv",
            "--format",
            "json",
        ]);
        let Command::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.schema, PathBuf::from("schema.json"));
        assert_eq!(args.input, Some(PathBuf::from("data.csv")));
        assert_eq!(args.format, ReportFormatArg::Json);
    }
}
