//! JSON report for scripting.
//!
//! Paths and directories are unescaped. Sizes are raw byte counts.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "lines": 5230, "files": 5210, "directories": 412, "skipped": 0,
//!     "failed": 2, "size_conflicts": 0, "total_bytes": 3435973836,
//!     "duplicate_groups": 640,
//!     "wasted": [
//!       { "cluster_size": 1, "bytes": 13107200, "display": "12.5 MiB" }
//!     ]
//!   },
//!   "clusters": [
//!     { "directories": ["./p1/", "./p2/"], "occurrences": 41, "wasted": 8388608 }
//!   ],
//!   "duplicates": [
//!     {
//!       "hash": "9f2c...", "size": 2097152, "redundant_copies": 2,
//!       "wasted": 4194304, "label": "4 MiB = 2*2 MiB",
//!       "paths": ["./x/clip.mp4", "./y/clip.mp4", "./z/clip.mp4"]
//!     }
//!   ],
//!   "omitted": 0
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use super::{listed, ReportOptions};
use crate::duplicates::{human_size, Analyzer, BestEntry, DirectoryCluster};
use crate::index::{unescape, LoadStats};

/// Reclaimable space under one cluster size.
#[derive(Debug, Clone, Serialize)]
pub struct JsonWasted {
    /// Cluster size in bytes
    pub cluster_size: u64,
    /// Reclaimable bytes
    pub bytes: u64,
    /// Human-readable form of `bytes`
    pub display: String,
}

/// Load statistics plus analysis totals.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Counters from loading the index
    #[serde(flatten)]
    pub stats: LoadStats,
    /// Number of content groups with more than one path
    pub duplicate_groups: usize,
    /// Totals per configured cluster size
    pub wasted: Vec<JsonWasted>,
}

/// A duplicate directory cluster.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCluster {
    /// Directories holding the same content, unescaped
    pub directories: Vec<String>,
    /// Duplicate groups sharing this directory pattern
    pub occurrences: usize,
    /// Bytes those groups waste
    pub wasted: u64,
}

impl From<&DirectoryCluster> for JsonCluster {
    fn from(cluster: &DirectoryCluster) -> Self {
        Self {
            directories: cluster.directories.iter().map(|d| unescape(d)).collect(),
            occurrences: cluster.occurrences,
            wasted: cluster.wasted,
        }
    }
}

/// An individually reported duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// Content hash
    pub hash: String,
    /// Size of one copy
    pub size: u64,
    /// Copies beyond the first
    pub redundant_copies: u64,
    /// Bytes wasted by the redundant copies
    pub wasted: u64,
    /// Human-readable size annotation
    pub label: String,
    /// Member paths, unescaped and sorted
    pub paths: Vec<String>,
}

impl From<&BestEntry<'_>> for JsonDuplicate {
    fn from(entry: &BestEntry<'_>) -> Self {
        Self {
            hash: entry.hash.to_string(),
            size: entry.group.size,
            redundant_copies: entry.redundant_copies,
            wasted: entry.wasted,
            label: entry.label.clone(),
            paths: entry.group.sorted_paths().into_iter().map(unescape).collect(),
        }
    }
}

/// Complete JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Totals
    pub summary: JsonSummary,
    /// Duplicate directory clusters
    pub clusters: Vec<JsonCluster>,
    /// Individually listed duplicates, largest first
    pub duplicates: Vec<JsonDuplicate>,
    /// Duplicates left out by the entry cap
    pub omitted: usize,
}

impl JsonReport {
    /// Collect a report from an analysis.
    #[must_use]
    pub fn new(analyzer: &Analyzer<'_>, stats: &LoadStats, options: &ReportOptions) -> Self {
        let wasted = options
            .cluster_sizes
            .iter()
            .zip(analyzer.wasted_space(&options.cluster_sizes))
            .map(|(&cluster_size, bytes)| JsonWasted {
                cluster_size,
                bytes,
                display: human_size(bytes),
            })
            .collect();

        let report = analyzer.clusters();
        let (shown, omitted) = listed(&report.residual, options.max_entries);

        Self {
            summary: JsonSummary {
                stats: stats.clone(),
                duplicate_groups: analyzer.sorted_duplicates().len(),
                wasted,
            },
            clusters: report.clusters.iter().map(JsonCluster::from).collect(),
            duplicates: shown.iter().map(JsonDuplicate::from).collect(),
            omitted,
        }
    }

    /// Stream the report to `writer`, one document per line when `compact`.
    ///
    /// I/O failures surface as [`serde_json::Error`] with an I/O category.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, compact: bool) -> serde_json::Result<()> {
        if compact {
            serde_json::to_writer(&mut *writer, self)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, self)?;
        }
        writer.write_all(b"\n").map_err(serde_json::Error::io)
    }
}
