//! Index record parsing.
//!
//! Each line of an index file describes one filesystem entry:
//!
//! ```text
//! path \t content_hash \t size \t atime \t mtime [\t ctime]
//! ```
//!
//! An empty hash marks a directory; the sentinel `failed` marks a file the
//! scanner could not read. The create time is absent on filesystems without
//! birth-time support.

use serde::{Deserialize, Serialize};

/// Hash value the scanner writes for unreadable files.
pub const FAILED_HASH: &str = "failed";

/// Field separator of the index format.
pub const FIELD_SEPARATOR: char = '\t';

/// Access, modification and (optional) creation time of an entry.
///
/// Timestamps are kept as the scanner wrote them (ISO-8601 UTC text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last access time
    pub accessed: String,
    /// Last modification time
    pub modified: String,
    /// Creation time, if the source filesystem records it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// What a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A directory (empty content hash)
    Directory,
    /// A regular file with a usable content hash
    File,
    /// A file the scanner failed to hash
    Unreadable,
}

/// One validated line of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// Escaped path (contains no literal space)
    pub path: String,
    /// Hex content hash; empty for directories
    pub content_hash: String,
    /// Size in bytes
    pub size: u64,
    /// Entry timestamps
    pub times: Timestamps,
}

impl PathRecord {
    /// Classify the record by its hash field.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        if self.content_hash.is_empty() {
            RecordKind::Directory
        } else if self.content_hash == FAILED_HASH {
            RecordKind::Unreadable
        } else {
            RecordKind::File
        }
    }

    /// Whether this record is a directory entry.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind() == RecordKind::Directory
    }
}

/// Reasons a line cannot become a [`PathRecord`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line has no content.
    #[error("empty line")]
    Empty,

    /// The line does not have 5 or 6 tab-separated fields.
    #[error("expected 5 or 6 fields, found {found}")]
    FieldCount {
        /// Number of fields present
        found: usize,
    },

    /// The size field is not a non-negative base-10 integer.
    #[error("invalid size {value:?}")]
    InvalidSize {
        /// The offending field
        value: String,
    },
}

/// Parse one index line.
///
/// Trailing line terminators are ignored. The line is validated completely; a
/// record is only produced when every field is usable.
///
/// # Errors
///
/// Returns [`RecordError`] for blank lines, a wrong field count or a size that
/// is not an unsigned integer.
///
/// # Example
///
/// ```
/// use dirdupe::index::record::{parse_line, RecordKind};
///
/// let record = parse_line("./a.txt\tabc123\t10\t2022-01-01T00:00:00Z\t2022-01-01T00:00:00Z\n").unwrap();
/// assert_eq!(record.kind(), RecordKind::File);
/// assert_eq!(record.size, 10);
/// assert!(record.times.created.is_none());
/// ```
pub fn parse_line(line: &str) -> Result<PathRecord, RecordError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(RecordError::Empty);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let (path, hash, size, accessed, modified, created) = match fields.as_slice() {
        [path, hash, size, atime, mtime] => (*path, *hash, *size, *atime, *mtime, None),
        [path, hash, size, atime, mtime, ctime] => {
            (*path, *hash, *size, *atime, *mtime, Some(*ctime))
        }
        other => return Err(RecordError::FieldCount { found: other.len() }),
    };

    let size = size.parse::<u64>().map_err(|_| RecordError::InvalidSize {
        value: size.to_string(),
    })?;

    Ok(PathRecord {
        path: path.to_string(),
        content_hash: hash.to_string(),
        size,
        times: Timestamps {
            accessed: accessed.to_string(),
            modified: modified.to_string(),
            created: created.map(str::to_string),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: &str = "2022-05-01T10:00:00Z";

    #[test]
    fn test_parse_file_with_ctime() {
        let line = format!("./docs/a.txt\tdeadbeef\t1234\t{T}\t{T}\t{T}\n");
        let record = parse_line(&line).unwrap();
        assert_eq!(record.path, "./docs/a.txt");
        assert_eq!(record.content_hash, "deadbeef");
        assert_eq!(record.size, 1234);
        assert_eq!(record.times.created.as_deref(), Some(T));
        assert_eq!(record.kind(), RecordKind::File);
    }

    #[test]
    fn test_parse_directory() {
        let record = parse_line(&format!("./docs\t\t0\t{T}\t{T}")).unwrap();
        assert!(record.is_directory());
    }

    #[test]
    fn test_parse_failed_hash() {
        let record = parse_line(&format!("./locked\tfailed\t99\t{T}\t{T}")).unwrap();
        assert_eq!(record.kind(), RecordKind::Unreadable);
    }

    #[test]
    fn test_parse_crlf_line() {
        let record = parse_line(&format!("./a\th\t1\t{T}\t{T}\r\n")).unwrap();
        assert_eq!(record.times.modified, T);
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            parse_line("./a\th\t1\tx"),
            Err(RecordError::FieldCount { found: 4 })
        );
        assert_eq!(
            parse_line("a\tb\tc\td\te\tf\tg"),
            Err(RecordError::FieldCount { found: 7 })
        );
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            parse_line(&format!("./a\th\t-5\t{T}\t{T}")),
            Err(RecordError::InvalidSize { .. })
        ));
        assert!(matches!(
            parse_line(&format!("./a\th\tten\t{T}\t{T}")),
            Err(RecordError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("\n"), Err(RecordError::Empty));
        assert_eq!(parse_line(""), Err(RecordError::Empty));
    }
}
