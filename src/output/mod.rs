//! Report formatters.
//!
//! Both formats render the same analysis:
//! - [`text`] for people reading a terminal
//! - [`json`] for scripting
//!
//! # Example
//!
//! ```
//! use dirdupe::duplicates::{Analyzer, ClusterConfig};
//! use dirdupe::index::FileIndex;
//! use dirdupe::output::{ReportOptions, TextReport};
//! use dirdupe::progress::NoProgress;
//!
//! let data = "./a/f\th1\t10\t0\t0\n./b/f\th1\t10\t0\t0\n";
//! let index = FileIndex::from_reader(data.as_bytes(), &mut NoProgress).unwrap();
//! let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
//!
//! let mut out = Vec::new();
//! TextReport::new(&analyzer, index.stats(), &ReportOptions::default())
//!     .write_to(&mut out)
//!     .unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("10 B / 4 KiB wasted"));
//! ```

pub mod json;
pub mod text;

pub use json::JsonReport;
pub use text::TextReport;

use crate::duplicates::BestEntry;

/// Report settings shared by every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Cluster sizes to total wasted space for.
    pub cluster_sizes: Vec<u64>,
    /// Cap on individually listed duplicates.
    pub max_entries: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            cluster_sizes: vec![1, 4096],
            max_entries: None,
        }
    }
}

/// Split residual entries into the listed part and the count left out.
fn listed<'r, 'a>(
    residual: &'r [BestEntry<'a>],
    max_entries: Option<usize>,
) -> (&'r [BestEntry<'a>], usize) {
    let shown = max_entries.map_or(residual.len(), |max| max.min(residual.len()));
    (&residual[..shown], residual.len() - shown)
}
