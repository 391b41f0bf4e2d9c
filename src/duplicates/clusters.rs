//! Duplicate directory detection.
//!
//! # Overview
//!
//! A duplicated project tree shows up as hundreds of duplicate groups whose
//! members sit in the same set of directories: every object under
//! `p1/.git/objects/00/` has a twin under `p2/.git/objects/00/`, and so on.
//! Reporting each file separately buries the one useful statement, "`p1/`
//! and `p2/` hold the same content".
//!
//! For every duplicate group the clusterer builds a *directory signature*:
//! the sorted parent directories of its members. The trailing path segments
//! shared by all directories of the signature are stripped, so
//! `("p1/.git/objects/00/", "p2/.git/objects/00/")` and
//! `("p1/src/", "p2/src/")` both become `("p1/", "p2/")`. Signatures that
//! recur across groups are reported once as a directory cluster. Remaining
//! groups are listed individually when they are large and not already
//! explained by a reported cluster.
//!
//! # Example
//!
//! ```
//! use dirdupe::duplicates::compress_signature;
//!
//! let signature = vec!["p1/.git/o/00/".to_string(), "p2/.git/o/00/".to_string()];
//! assert_eq!(compress_signature(&signature, 2), vec!["p1/", "p2/"]);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ranker::{BestEntry, DuplicateEntry};
use crate::index::tree::{is_separator, split_path};

/// Canonical separator used in signatures.
pub const SEPARATOR: char = '/';

/// Default minimum number of `/`-delimited parts the first directory of a
/// signature must keep after suffix stripping.
pub const DEFAULT_MIN_PREFIX_PARTS: usize = 2;

/// Default wasted-space threshold for listing a group individually (2 MiB).
pub const DEFAULT_RESIDUAL_THRESHOLD: u64 = 2 * 1024 * 1024;

/// Tuning for directory clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Suffix stripping is rejected when the first directory would keep fewer
    /// parts than this. `"p1/"` has two parts (`p1` and the empty tail), `""`
    /// has one.
    pub min_prefix_parts: usize,
    /// Groups not absorbed by a cluster are listed only above this many
    /// wasted bytes.
    pub residual_threshold: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_prefix_parts: DEFAULT_MIN_PREFIX_PARTS,
            residual_threshold: DEFAULT_RESIDUAL_THRESHOLD,
        }
    }
}

/// A set of directories that repeatedly hold the same duplicated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCluster {
    /// Compressed signature, in canonical order
    pub directories: Vec<String>,
    /// Number of duplicate groups with this signature
    pub occurrences: usize,
    /// Bytes those groups waste together
    pub wasted: u64,
}

/// Result of clustering: the directory clusters plus leftover file entries.
#[derive(Debug, Clone)]
pub struct ClusterReport<'a> {
    /// Recurring signatures, most frequent first
    pub clusters: Vec<DirectoryCluster>,
    /// Duplicate groups absorbed into clusters
    pub absorbed_groups: usize,
    /// Large groups that no cluster explains
    pub residual: Vec<BestEntry<'a>>,
}

impl ClusterReport<'_> {
    /// Bytes wasted by all absorbed groups.
    #[must_use]
    pub fn absorbed_wasted(&self) -> u64 {
        self.clusters
            .iter()
            .fold(0u64, |total, c| total.saturating_add(c.wasted))
    }
}

/// Replace every separator with the canonical `/`.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if is_separator(c) { SEPARATOR } else { c })
        .collect()
}

/// Sorted parent directories of a group's paths, separators normalized.
///
/// Two members in the same directory keep two entries.
#[must_use]
pub fn directory_signature<'p>(paths: impl IntoIterator<Item = &'p str>) -> Vec<String> {
    let mut directories: Vec<String> = paths
        .into_iter()
        .map(|path| normalize_separators(split_path(path).parent))
        .collect();
    directories.sort_unstable();
    directories
}

/// Strip the trailing path segments shared by every directory.
///
/// Only whole segments are removed. If the first directory would be left with
/// fewer than `min_prefix_parts` parts, the signature is returned unchanged.
#[must_use]
pub fn compress_signature(signature: &[String], min_prefix_parts: usize) -> Vec<String> {
    let segments: Vec<Vec<&str>> = signature
        .iter()
        .map(|dir| dir.split_terminator(SEPARATOR).collect())
        .collect();

    let Some(first) = segments.first() else {
        return Vec::new();
    };
    let shortest = segments.iter().map(Vec::len).min().unwrap_or(0);
    let common = (1..=shortest)
        .take_while(|&back| {
            let segment = first[first.len() - back];
            segments.iter().all(|s| s[s.len() - back] == segment)
        })
        .count();

    if common == 0 {
        return signature.to_vec();
    }

    let stripped: Vec<String> = segments
        .iter()
        .map(|s| {
            let kept = &s[..s.len() - common];
            if kept.is_empty() {
                String::new()
            } else {
                let mut dir = kept.join("/");
                dir.push(SEPARATOR);
                dir
            }
        })
        .collect();

    if stripped[0].split(SEPARATOR).count() < min_prefix_parts {
        log::trace!(
            "Suffix compression rejected for {:?}: too few segments left",
            signature
        );
        return signature.to_vec();
    }

    stripped
}

/// Whether `path` or one of its ancestor directories is in `covered`.
///
/// Directories in `covered` are spelled with a trailing `/`; `""` is the root.
#[must_use]
pub fn is_covered(path: &str, covered: &HashSet<String>) -> bool {
    let path = normalize_separators(path);
    if covered.contains(&path) || covered.contains("") {
        return true;
    }
    path.match_indices(SEPARATOR)
        .any(|(idx, _)| covered.contains(&path[..=idx]))
}

#[derive(Debug, Default)]
struct Tally {
    occurrences: usize,
    wasted: u64,
}

/// Cluster ranked duplicates into duplicate-directory statements.
///
/// `duplicates` is the full ranking; `best` is its prefix of groups that waste
/// space. Every duplicate group counts toward signature frequency; only
/// `best` entries can become residual entries.
#[must_use]
pub fn cluster<'a>(
    duplicates: &[DuplicateEntry<'a>],
    best: &[BestEntry<'a>],
    config: &ClusterConfig,
) -> ClusterReport<'a> {
    let signatures: Vec<Vec<String>> = duplicates
        .iter()
        .map(|entry| {
            let signature = directory_signature(entry.group.paths.keys().map(String::as_str));
            compress_signature(&signature, config.min_prefix_parts)
        })
        .collect();

    let mut tallies: HashMap<&[String], Tally> = HashMap::new();
    for (entry, signature) in duplicates.iter().zip(&signatures) {
        let tally = tallies.entry(signature.as_slice()).or_default();
        tally.occurrences += 1;
        tally.wasted = tally.wasted.saturating_add(entry.wasted(1));
    }

    let mut clusters: Vec<DirectoryCluster> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.occurrences > 1)
        .map(|(directories, tally)| DirectoryCluster {
            directories: directories.to_vec(),
            occurrences: tally.occurrences,
            wasted: tally.wasted,
        })
        .collect();
    clusters.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.directories.cmp(&b.directories))
    });

    let absorbed_groups = clusters.iter().map(|c| c.occurrences).sum();
    let retained: HashSet<&[String]> = clusters.iter().map(|c| c.directories.as_slice()).collect();
    let covered: HashSet<String> = clusters
        .iter()
        .flat_map(|c| c.directories.iter().cloned())
        .collect();
    if let Some(root) = ["", "./"].into_iter().find(|dir| covered.contains(*dir)) {
        log::debug!(
            "Scan root {:?} is in a duplicate directory cluster; residual entries anywhere below it are hidden",
            root
        );
    }

    // `best` is a prefix of `duplicates`, so signatures line up by position.
    let residual: Vec<BestEntry<'a>> = best
        .iter()
        .zip(&signatures)
        .filter(|(_, signature)| !retained.contains(signature.as_slice()))
        .filter(|(entry, _)| entry.wasted > config.residual_threshold)
        .filter(|(entry, _)| {
            !entry
                .group
                .paths
                .keys()
                .all(|path| is_covered(split_path(path).parent, &covered))
        })
        .map(|(entry, _)| entry.clone())
        .collect();

    log::info!(
        "{} directory clusters absorb {} duplicate groups; {} groups listed individually",
        clusters.len(),
        absorbed_groups,
        residual.len()
    );

    ClusterReport {
        clusters,
        absorbed_groups,
        residual,
    }
}
