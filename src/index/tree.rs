//! Directory tree built from index paths.
//!
//! The tree maps every parent directory (spelled with its trailing separator)
//! to its children in scan order. It only backs prefix completion; ranking
//! never looks at it.
//!
//! # Example
//!
//! ```
//! use dirdupe::index::tree::PathTree;
//!
//! let mut tree = PathTree::new();
//! tree.insert("./music", "", true);
//! tree.insert("./music/a.mp3", "abc", false);
//!
//! let children = tree.children("./music/").unwrap();
//! assert_eq!(children[0].name, "a.mp3");
//! assert_eq!(tree.children("./").unwrap()[0].name, "music/");
//! ```

use std::collections::HashMap;

/// Name of the scan start directory as the scanner writes it.
pub const ROOT_DOT: &str = ".";

/// Root markers registered when the scan root has children.
pub const ROOT_MARKERS: [&str; 2] = ["./", ".\\"];

/// Check if a character is a path separator (either convention).
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// A path split at its last separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    /// Everything up to and including the last separator ("" at the root)
    pub parent: &'a str,
    /// The final component
    pub name: &'a str,
    /// Separator convention of the path, if it has one
    pub separator: Option<char>,
}

/// Split a path into parent directory and final name.
///
/// One trailing separator is ignored. The separator convention is the first
/// `/` or `\` in the path; the split happens at its last occurrence.
///
/// ```
/// use dirdupe::index::tree::split_path;
///
/// let split = split_path("./a/b/");
/// assert_eq!(split.parent, "./a/");
/// assert_eq!(split.name, "b");
/// assert_eq!(split.separator, Some('/'));
/// ```
#[must_use]
pub fn split_path(path: &str) -> SplitPath<'_> {
    let trimmed = path
        .strip_suffix(is_separator)
        .unwrap_or(path);

    let Some(separator) = trimmed.chars().find(|c| is_separator(*c)) else {
        return SplitPath {
            parent: "",
            name: trimmed,
            separator: None,
        };
    };

    // The separator was found, so rfind cannot miss.
    let idx = trimmed.rfind(separator).unwrap_or(0);
    let cut = idx + separator.len_utf8();
    SplitPath {
        parent: &trimmed[..cut],
        name: &trimmed[cut..],
        separator: Some(separator),
    }
}

/// A child registered under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Child name; directories carry a trailing separator
    pub name: String,
    /// Content hash, empty for directories
    pub hash: String,
}

impl TreeEntry {
    /// Whether this child is marked as a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.name.ends_with(is_separator)
    }
}

/// Parent directory → ordered children.
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    children: HashMap<String, Vec<TreeEntry>>,
}

impl PathTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path under its parent directory.
    pub fn insert(&mut self, path: &str, hash: &str, is_directory: bool) {
        let split = split_path(path);
        let mut name = split.name.to_string();
        if is_directory {
            if let Some(separator) = split.separator {
                name.push(separator);
            }
        }
        self.children
            .entry(split.parent.to_string())
            .or_default()
            .push(TreeEntry {
                name,
                hash: hash.to_string(),
            });
    }

    /// Replace the scanner's bare `.` root entry with explicit root markers.
    ///
    /// Called once after loading. A marker is only registered when the tree
    /// actually has children under it.
    pub fn finalize_root(&mut self) {
        let markers: Vec<&str> = ROOT_MARKERS
            .into_iter()
            .filter(|marker| self.children.contains_key(*marker))
            .collect();

        let root = self.children.entry(String::new()).or_default();
        root.retain(|entry| !(entry.name == ROOT_DOT && entry.hash.is_empty()));
        for marker in markers {
            if !root.iter().any(|entry| entry.name == marker) {
                root.push(TreeEntry {
                    name: marker.to_string(),
                    hash: String::new(),
                });
            }
        }

        if root.is_empty() {
            self.children.remove("");
        }
    }

    /// Children registered under `parent`, or `None` for an unknown directory.
    #[must_use]
    pub fn children(&self, parent: &str) -> Option<&[TreeEntry]> {
        self.children.get(parent).map(Vec::as_slice)
    }

    /// Check if `parent` is a known directory.
    #[must_use]
    pub fn contains(&self, parent: &str) -> bool {
        self.children.contains_key(parent)
    }

    /// Number of directories with registered children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
