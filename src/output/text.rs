//! Plain-text report.
//!
//! ```text
//! 12.5 MiB / 12.63 MiB wasted
//! Indexed 5210 files (3.2 GiB) in 412 directories
//!
//! 2 duplicate directory clusters absorb 57 duplicate groups (12 MiB)
//!   41x  8 MiB  "./p1/" "./p2/"
//!   16x  4 MiB  "./a/.git/o/" "./b/.git/o/"
//!
//! Largest remaining duplicates:
//! 4 MiB = 2*2 MiB	9f2c...	"./x/clip.mp4" "./y/clip.mp4" "./z/clip.mp4"
//! ```

use std::io::{self, Write};

use super::{listed, ReportOptions};
use crate::duplicates::{human_size, Analyzer, BestEntry, DirectoryCluster};
use crate::index::{display_path, LoadStats};

/// Text rendering of one analysis.
pub struct TextReport<'r, 'a> {
    analyzer: &'r Analyzer<'a>,
    stats: &'r LoadStats,
    options: &'r ReportOptions,
}

impl<'r, 'a> TextReport<'r, 'a> {
    /// Bind a report to an analyzer and the load statistics of its index.
    #[must_use]
    pub fn new(analyzer: &'r Analyzer<'a>, stats: &'r LoadStats, options: &'r ReportOptions) -> Self {
        Self {
            analyzer,
            stats,
            options,
        }
    }

    /// Write the whole report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let totals: Vec<String> = self
            .analyzer
            .wasted_space(&self.options.cluster_sizes)
            .into_iter()
            .map(human_size)
            .collect();
        writeln!(out, "{} wasted", totals.join(" / "))?;
        self.write_stats(out)?;

        if self.analyzer.sorted_duplicates().is_empty() {
            writeln!(out)?;
            writeln!(out, "No duplicates found.")?;
            return Ok(());
        }

        let report = self.analyzer.clusters();
        writeln!(out)?;
        writeln!(
            out,
            "{} duplicate directory clusters absorb {} duplicate groups ({})",
            report.clusters.len(),
            report.absorbed_groups,
            human_size(report.absorbed_wasted())
        )?;
        for cluster in &report.clusters {
            write_cluster(out, cluster)?;
        }

        writeln!(out)?;
        if report.residual.is_empty() {
            writeln!(
                out,
                "No other duplicates waste more than {}.",
                human_size(self.analyzer.config().residual_threshold)
            )?;
            return Ok(());
        }

        writeln!(out, "Largest remaining duplicates:")?;
        let (shown, omitted) = listed(&report.residual, self.options.max_entries);
        for entry in shown {
            write_entry(out, entry)?;
        }
        if omitted > 0 {
            writeln!(out, "... and {} more", omitted)?;
        }
        Ok(())
    }

    /// Render to a string.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`TextReport::write_to`].
    pub fn render(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn write_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "Indexed {} files ({}) in {} directories",
            self.stats.files,
            human_size(self.stats.total_bytes),
            self.stats.directories
        )?;
        let mut notes = Vec::new();
        if self.stats.skipped > 0 {
            notes.push(format!("{} lines skipped", self.stats.skipped));
        }
        if self.stats.failed > 0 {
            notes.push(format!("{} unreadable", self.stats.failed));
        }
        if notes.is_empty() {
            writeln!(out)
        } else {
            writeln!(out, " ({})", notes.join(", "))
        }
    }
}

fn write_cluster<W: Write>(out: &mut W, cluster: &DirectoryCluster) -> io::Result<()> {
    let dirs: Vec<String> = cluster
        .directories
        .iter()
        .map(|dir| display_path(dir))
        .collect();
    writeln!(
        out,
        "  {}x  {}  {}",
        cluster.occurrences,
        human_size(cluster.wasted),
        dirs.join(" ")
    )
}

fn write_entry<W: Write>(out: &mut W, entry: &BestEntry<'_>) -> io::Result<()> {
    let paths: Vec<String> = entry
        .group
        .sorted_paths()
        .into_iter()
        .map(display_path)
        .collect();
    writeln!(out, "{}\t{}\t{}", entry.label, entry.hash, paths.join(" "))
}
