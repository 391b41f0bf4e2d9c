//! Duplicate analysis module.
//!
//! This module provides functionality for:
//! - Ranking duplicate groups by reclaimable space ([`ranker`])
//! - Totals of reclaimable space under storage cluster sizes
//! - Compressing repeated duplication patterns into directory clusters ([`clusters`])
//! - Human-readable sizes ([`size`])

pub mod clusters;
pub mod ranker;
pub mod size;

pub use clusters::{
    compress_signature, directory_signature, is_covered, ClusterConfig, ClusterReport,
    DirectoryCluster,
};
pub use ranker::{size_label, Analyzer, BestEntry, DuplicateEntry};
pub use size::human_size;
