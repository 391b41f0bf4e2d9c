//! Content-addressed grouping of indexed files.

use std::collections::HashMap;

use serde::Serialize;

use super::record::Timestamps;

/// Every path known to share one content hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentGroup {
    /// Canonical size of the content in bytes (last seen value)
    pub size: u64,
    /// Member paths and their timestamps
    pub paths: HashMap<String, Timestamps>,
}

impl ContentGroup {
    /// Number of paths sharing this content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group has no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// A group is a duplicate only with two or more paths.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.paths.len() > 1
    }

    /// Number of redundant copies (all paths minus one kept).
    #[must_use]
    pub fn redundant_copies(&self) -> u64 {
        self.paths.len().saturating_sub(1) as u64
    }

    /// Reclaimable bytes when allocation rounds up to `cluster_size`.
    ///
    /// `cluster_size` must be non-zero. Saturates at `u64::MAX`.
    #[must_use]
    pub fn wasted(&self, cluster_size: u64) -> u64 {
        self.size
            .div_ceil(cluster_size)
            .saturating_mul(cluster_size)
            .saturating_mul(self.redundant_copies())
    }

    /// Member paths in lexicographic order.
    #[must_use]
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Outcome of adding a file to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The size matched (or the hash was new).
    Consistent,
    /// The hash was known with another size; the new size replaced it.
    SizeReplaced {
        /// Size previously stored for the hash
        previous: u64,
    },
}

/// Map from content hash to [`ContentGroup`].
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    groups: HashMap<String, ContentGroup>,
}

impl ContentIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file path under its hash.
    ///
    /// A size that disagrees with the stored one replaces it; the caller decides
    /// how to report that.
    pub fn insert(
        &mut self,
        hash: &str,
        size: u64,
        path: &str,
        times: Timestamps,
    ) -> InsertOutcome {
        let group = self
            .groups
            .entry(hash.to_string())
            .or_insert_with(|| ContentGroup {
                size,
                paths: HashMap::new(),
            });

        let outcome = if group.size == size {
            InsertOutcome::Consistent
        } else {
            let previous = group.size;
            group.size = size;
            InsertOutcome::SizeReplaced { previous }
        };

        group.paths.insert(path.to_string(), times);
        outcome
    }

    /// Look up a group by hash.
    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&ContentGroup> {
        self.groups.get(hash)
    }

    /// Number of distinct hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the index has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over `(hash, group)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentGroup)> {
        self.groups.iter().map(|(hash, group)| (hash.as_str(), group))
    }
}
