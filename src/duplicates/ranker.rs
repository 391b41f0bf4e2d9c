//! Ranking duplicate groups and accounting for reclaimable space.
//!
//! [`Analyzer`] borrows a loaded [`ContentIndex`] and derives everything the
//! report needs from it. Results are computed on first use and cached; the
//! index is immutable, so caches only change through [`Analyzer::refresh`].
//!
//! # Example
//!
//! ```
//! use dirdupe::duplicates::{Analyzer, ClusterConfig};
//! use dirdupe::index::FileIndex;
//! use dirdupe::progress::NoProgress;
//!
//! let data = "a/x\tH1\t100\tT\tT\nb/x\tH1\t100\tT\tT\n";
//! let index = FileIndex::from_reader(data.as_bytes(), &mut NoProgress).unwrap();
//! let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
//!
//! assert_eq!(analyzer.wasted_space(&[1, 4096]), vec![100, 4096]);
//! assert_eq!(analyzer.best().len(), 1);
//! assert_eq!(analyzer.best()[0].redundant_copies, 1);
//! ```

use std::cell::{OnceCell, RefCell};
use std::cmp::Reverse;
use std::collections::HashMap;

use super::clusters::{self, ClusterConfig, ClusterReport};
use super::size::human_size;
use crate::index::{ContentGroup, ContentIndex};

/// A content group with at least two paths.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateEntry<'a> {
    /// Content hash shared by every path
    pub hash: &'a str,
    /// The group itself
    pub group: &'a ContentGroup,
}

impl DuplicateEntry<'_> {
    /// Reclaimable bytes at the given cluster size.
    #[must_use]
    pub fn wasted(&self, cluster_size: u64) -> u64 {
        self.group.wasted(cluster_size)
    }
}

/// A ranked duplicate group worth reporting, with its display label.
#[derive(Debug, Clone)]
pub struct BestEntry<'a> {
    /// Content hash
    pub hash: &'a str,
    /// The duplicate group
    pub group: &'a ContentGroup,
    /// Copies that could be removed (paths minus one)
    pub redundant_copies: u64,
    /// Reclaimable bytes without cluster rounding
    pub wasted: u64,
    /// Size label, e.g. `"3 MiB = 3*1 MiB"` or `"1 MiB"`
    pub label: String,
}

/// Size label for a group: the unit size, or `total = q*unit` when more than
/// one copy is redundant.
#[must_use]
pub fn size_label(size: u64, redundant_copies: u64) -> String {
    let unit = human_size(size);
    if redundant_copies >= 2 {
        format!(
            "{} = {}*{}",
            human_size(size.saturating_mul(redundant_copies)),
            redundant_copies,
            unit
        )
    } else {
        unit
    }
}

/// Lazily computed duplicate analysis over a content index.
pub struct Analyzer<'a> {
    index: &'a ContentIndex,
    config: ClusterConfig,
    sorted: OnceCell<Vec<DuplicateEntry<'a>>>,
    best: OnceCell<Vec<BestEntry<'a>>>,
    clusters: OnceCell<ClusterReport<'a>>,
    wasted: RefCell<HashMap<Vec<u64>, Vec<u64>>>,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer for a loaded index.
    #[must_use]
    pub fn new(index: &'a ContentIndex, config: ClusterConfig) -> Self {
        Self {
            index,
            config,
            sorted: OnceCell::new(),
            best: OnceCell::new(),
            clusters: OnceCell::new(),
            wasted: RefCell::new(HashMap::new()),
        }
    }

    /// Clustering parameters in use.
    #[must_use]
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Drop every cached result so the next access recomputes it.
    pub fn refresh(&mut self) {
        self.sorted.take();
        self.best.take();
        self.clusters.take();
        self.wasted.get_mut().clear();
        log::debug!("Analysis caches cleared");
    }

    /// Duplicate groups, most reclaimable space first, ties by ascending hash.
    pub fn sorted_duplicates(&self) -> &[DuplicateEntry<'a>] {
        self.sorted.get_or_init(|| {
            let mut entries: Vec<DuplicateEntry<'a>> = self
                .index
                .iter()
                .filter(|(_, group)| group.is_duplicate())
                .map(|(hash, group)| DuplicateEntry { hash, group })
                .collect();
            entries.sort_by_key(|e| (Reverse(e.wasted(1)), e.hash));

            log::debug!(
                "Ranked {} duplicate groups out of {} hashes",
                entries.len(),
                self.index.len()
            );
            entries
        })
    }

    /// Total reclaimable bytes for each requested cluster size.
    ///
    /// All sizes are accumulated in a single pass over the duplicates. A zero
    /// cluster size is treated as 1.
    pub fn wasted_space(&self, cluster_sizes: &[u64]) -> Vec<u64> {
        if let Some(totals) = self.wasted.borrow().get(cluster_sizes) {
            return totals.clone();
        }

        let sizes: Vec<u64> = cluster_sizes.iter().map(|&s| s.max(1)).collect();
        let mut totals = vec![0u64; sizes.len()];
        for entry in self.sorted_duplicates() {
            for (total, &cluster_size) in totals.iter_mut().zip(&sizes) {
                *total = total.saturating_add(entry.wasted(cluster_size));
            }
        }

        self.wasted
            .borrow_mut()
            .insert(cluster_sizes.to_vec(), totals.clone());
        totals
    }

    /// Duplicate groups that actually waste space, with size labels.
    ///
    /// Stops at the first group wasting nothing; everything after it in the
    /// ranking wastes nothing either.
    pub fn best(&self) -> &[BestEntry<'a>] {
        self.best.get_or_init(|| {
            self.sorted_duplicates()
                .iter()
                .map_while(|entry| {
                    let wasted = entry.wasted(1);
                    (wasted > 0).then(|| {
                        let redundant_copies = entry.group.redundant_copies();
                        BestEntry {
                            hash: entry.hash,
                            group: entry.group,
                            redundant_copies,
                            wasted,
                            label: size_label(entry.group.size, redundant_copies),
                        }
                    })
                })
                .collect()
        })
    }

    /// Duplicate directory clusters and the residual file-level entries.
    pub fn clusters(&self) -> &ClusterReport<'a> {
        self.clusters.get_or_init(|| {
            clusters::cluster(self.sorted_duplicates(), self.best(), &self.config)
        })
    }
}
