//! dirdupe - duplicate analysis over a captured file index
//!
//! Loads a tab-separated index of paths, content hashes and sizes, ranks
//! duplicate content by reclaimable space, and folds repeated duplication
//! across parallel directory trees into duplicate-directory statements.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod logging;
pub mod navigator;
pub mod output;
pub mod progress;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use cli::{BrowseArgs, Cli, Commands, OutputFormat, ReportArgs};
use config::Config;
use duplicates::Analyzer;
use error::ExitCode;
use index::FileIndex;
use navigator::Navigator;
use output::{JsonReport, ReportOptions, TextReport};
use progress::LoadProgress;

/// Run the parsed command line.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the index cannot be read,
/// or writing to stdout fails.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Report(args) => {
            apply_report_overrides(&mut config, &args);
            config.validate().context("Invalid report options")?;
            run_report(&config, &args)
        }
        Commands::Browse(args) => run_browse(&config, &args),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::Success)
        }
    }
}

/// Fold command-line flags over the loaded configuration.
pub fn apply_report_overrides(config: &mut Config, args: &ReportArgs) {
    if !args.cluster_sizes.is_empty() {
        config.cluster_sizes.clone_from(&args.cluster_sizes);
    }
    if let Some(threshold) = args.residual_threshold {
        config.residual_threshold = threshold;
    }
    if let Some(parts) = args.min_prefix_parts {
        config.min_prefix_parts = usize::try_from(parts).unwrap_or(usize::MAX);
    }
    if args.max_entries.is_some() {
        config.max_entries = args.max_entries;
    }
}

fn load_index(path: &Path, config: &Config) -> anyhow::Result<FileIndex> {
    let mut progress = LoadProgress::new(config.progress_interval());
    let index = FileIndex::open(path, &mut progress)
        .with_context(|| format!("Failed to load index {}", path.display()))?;
    log::debug!("{} progress reports while loading", progress.reports());
    Ok(index)
}

fn run_report(config: &Config, args: &ReportArgs) -> anyhow::Result<ExitCode> {
    let index = load_index(&args.index, config)?;
    let analyzer = Analyzer::new(index.content(), config.cluster_config());
    let options = ReportOptions {
        cluster_sizes: config.cluster_sizes.clone(),
        max_entries: config.max_entries,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Text => TextReport::new(&analyzer, index.stats(), &options)
            .write_to(&mut out)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonReport::new(&analyzer, index.stats(), &options)
            .write_to(&mut out, args.compact)
            .context("Failed to write report")?,
    }
    out.flush()?;

    if analyzer.sorted_duplicates().is_empty() {
        log::info!("No duplicates found");
        Ok(ExitCode::NoDuplicates)
    } else {
        Ok(ExitCode::Success)
    }
}

fn run_browse(config: &Config, args: &BrowseArgs) -> anyhow::Result<ExitCode> {
    let index = load_index(&args.index, config)?;
    let mut navigator = Navigator::new(index.tree());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = navigator::run_session(&mut navigator, stdin.lock(), stdout.lock())
        .context("Completion session failed")?;
    log::info!("Answered {} completion queries", answered);
    Ok(ExitCode::Success)
}
