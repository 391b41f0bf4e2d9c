//! Command-line interface definitions for dirdupe.
//!
//! # Example
//!
//! ```bash
//! # Text report with the default cluster sizes (1 B and 4 KiB)
//! dirdupe report index.txt
//!
//! # JSON report, 64 KiB clusters, list everything wasting over 1 MiB
//! dirdupe report index.txt --output json --cluster-size 64KiB --residual-threshold 1MiB
//!
//! # Interactive completion: one query per stdin line
//! dirdupe browse index.txt
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Duplicate analysis over a captured file index.
///
/// dirdupe reads a tab-separated listing of paths, content hashes and
/// sizes, then reports how much space duplicated content wastes and which
/// directories are wholesale copies of each other.
#[derive(Debug, Parser)]
#[command(name = "dirdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "DIRDUPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report wasted space, duplicate directory clusters and large duplicates
    Report(ReportArgs),
    /// Answer path completion queries read from stdin
    Browse(BrowseArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Index file to analyze
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Cluster size to total wasted space for (repeatable, e.g. 4KiB)
    ///
    /// Replaces the configured list when given.
    #[arg(long = "cluster-size", value_name = "SIZE", value_parser = parse_size)]
    pub cluster_sizes: Vec<u64>,

    /// List unclustered duplicates wasting more than this (e.g. 2MiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub residual_threshold: Option<u64>,

    /// Minimum path parts the first directory keeps when compressing clusters
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub min_prefix_parts: Option<u64>,

    /// Stop after listing this many individual duplicates
    #[arg(long, value_name = "N")]
    pub max_entries: Option<usize>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the browse subcommand.
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Index file to navigate
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Size suffixes accepted by [`parse_size`], matched case-insensitively.
const SIZE_SUFFIXES: &[(&str, u64)] = &[
    ("", 1),
    ("B", 1),
    ("K", 1 << 10),
    ("KB", 1 << 10),
    ("KIB", 1 << 10),
    ("M", 1 << 20),
    ("MB", 1 << 20),
    ("MIB", 1 << 20),
    ("G", 1 << 30),
    ("GB", 1 << 30),
    ("GIB", 1 << 30),
    ("T", 1 << 40),
    ("TB", 1 << 40),
    ("TIB", 1 << 40),
];

/// Parse a human-readable size into bytes.
///
/// Cluster and threshold sizes are storage quantities, so every suffix is
/// binary: `4K`, `4KB` and `4KiB` all mean 4096. Fractions are allowed
/// (`1.5MiB`) and truncated to whole bytes.
///
/// # Errors
///
/// Returns a message for empty input, a malformed number or an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);
    let suffix = suffix.trim().to_ascii_uppercase();

    let multiplier = SIZE_SUFFIXES
        .iter()
        .find(|(name, _)| *name == suffix)
        .map(|&(_, multiplier)| multiplier)
        .ok_or_else(|| format!("Unknown size suffix: '{suffix}'"))?;

    if let Ok(whole) = number.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| format!("Size too large: '{s}'"));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| format!("Invalid number: '{number}'"))?;
    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(format!("Size too large: '{s}'"));
    }
    Ok(bytes as u64)
}
