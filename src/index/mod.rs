//! Loading a captured file index.
//!
//! This module provides functionality for:
//! - Parsing index lines into validated records ([`record`])
//! - Space escaping of index paths ([`escape`])
//! - Grouping files by content hash ([`content`])
//! - The directory tree used for prefix completion ([`tree`])
//!
//! Loading never aborts on bad data: malformed lines, unreadable-file sentinels
//! and size conflicts are logged, counted in [`LoadStats`], and skipped or
//! tolerated. Only I/O failures on the index itself are errors.
//!
//! # Example
//!
//! ```
//! use dirdupe::index::FileIndex;
//! use dirdupe::progress::NoProgress;
//!
//! let data = "./a/x\th1\t100\tT\tT\n./b/x\th1\t100\tT\tT\n";
//! let index = FileIndex::from_reader(data.as_bytes(), &mut NoProgress).unwrap();
//!
//! assert_eq!(index.stats().files, 2);
//! assert!(index.content().get("h1").unwrap().is_duplicate());
//! ```

pub mod content;
pub mod escape;
pub mod record;
pub mod tree;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use content::{ContentGroup, ContentIndex, InsertOutcome};
pub use escape::{display_path, escape, unescape};
pub use record::{parse_line, PathRecord, RecordError, RecordKind, Timestamps, FAILED_HASH};
pub use tree::{split_path, PathTree, SplitPath, TreeEntry};

use crate::progress::ProgressCallback;

/// Errors that can occur while loading an index.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// The index file could not be opened.
    #[error("Cannot open index {path}: {source}")]
    Open {
        /// Path of the index file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading the index failed part way through.
    #[error("I/O error while reading index: {0}")]
    Read(#[from] std::io::Error),
}

/// Counters collected while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Lines read from the source
    pub lines: usize,
    /// File records placed in the content index
    pub files: usize,
    /// Directory records
    pub directories: usize,
    /// Lines skipped as malformed
    pub skipped: usize,
    /// Records carrying the unreadable-file sentinel
    pub failed: usize,
    /// Records whose size disagreed with an earlier record of the same hash
    pub size_conflicts: usize,
    /// Total bytes of indexed files
    pub total_bytes: u64,
}

/// The loaded, immutable index: content groups plus directory tree.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    content: ContentIndex,
    tree: PathTree,
    stats: LoadStats,
}

impl FileIndex {
    /// Load an index file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the file cannot be opened or read.
    pub fn open(path: &Path, progress: &mut dyn ProgressCallback) -> Result<Self, IndexError> {
        let file = File::open(path).map_err(|source| IndexError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        progress.on_phase_start(&path.display().to_string());
        let index = Self::load(BufReader::new(file), progress)?;
        progress.on_phase_end();
        Ok(index)
    }

    /// Load an index from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Read`] if the reader fails.
    pub fn from_reader<R: BufRead>(
        reader: R,
        progress: &mut dyn ProgressCallback,
    ) -> Result<Self, IndexError> {
        progress.on_phase_start("<reader>");
        let index = Self::load(reader, progress)?;
        progress.on_phase_end();
        Ok(index)
    }

    fn load<R: BufRead>(
        mut reader: R,
        progress: &mut dyn ProgressCallback,
    ) -> Result<Self, IndexError> {
        let mut index = Self::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            index.stats.lines += 1;
            let line = String::from_utf8_lossy(&buf);
            index.add_line(&line, progress);
        }

        index.tree.finalize_root();

        log::info!(
            "Loaded {} lines: {} files ({}), {} directories, {} skipped, {} unreadable",
            index.stats.lines,
            index.stats.files,
            crate::duplicates::human_size(index.stats.total_bytes),
            index.stats.directories,
            index.stats.skipped,
            index.stats.failed
        );
        if index.stats.size_conflicts > 0 {
            log::warn!(
                "{} record(s) disagreed on the size of their content",
                index.stats.size_conflicts
            );
        }

        Ok(index)
    }

    fn add_line(&mut self, line: &str, progress: &mut dyn ProgressCallback) {
        let record = match parse_line(line) {
            Ok(record) => record,
            Err(RecordError::Empty) => {
                log::trace!("Skipping blank line {}", self.stats.lines);
                return;
            }
            Err(e) => {
                self.stats.skipped += 1;
                log::warn!("Ignoring line {} ({}): {:?}", self.stats.lines, e, line);
                return;
            }
        };

        progress.on_progress(&record.path, record.size);

        match record.kind() {
            RecordKind::Directory => {
                self.stats.directories += 1;
                self.tree.insert(&record.path, "", true);
            }
            RecordKind::Unreadable => {
                self.stats.failed += 1;
                log::warn!("Unreadable file excluded: {}", record.path);
                self.tree.insert(&record.path, &record.content_hash, false);
            }
            RecordKind::File => {
                self.stats.files += 1;
                self.stats.total_bytes = self.stats.total_bytes.saturating_add(record.size);
                self.tree.insert(&record.path, &record.content_hash, false);
                let outcome = self.content.insert(
                    &record.content_hash,
                    record.size,
                    &record.path,
                    record.times,
                );
                if let InsertOutcome::SizeReplaced { previous } = outcome {
                    self.stats.size_conflicts += 1;
                    log::warn!(
                        "sizes differ for {}: {} then {} ({})",
                        record.content_hash,
                        previous,
                        record.size,
                        record.path
                    );
                }
            }
        }
    }

    /// Content groups keyed by hash.
    #[must_use]
    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    /// Directory tree for completion.
    #[must_use]
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Counters from loading.
    #[must_use]
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}
