//! Prefix completion over the loaded directory tree.
//!
//! The [`Navigator`] answers "which entries continue this text" for an
//! interactive front end. A single unambiguous file completion ends with a
//! space, the line-editor convention for "done"; directories end with their
//! separator so the user can keep descending.
//!
//! # Example
//!
//! ```
//! use dirdupe::index::PathTree;
//! use dirdupe::navigator::Navigator;
//!
//! let mut tree = PathTree::new();
//! tree.insert("./docs", "", true);
//! tree.insert("./docs/report.pdf", "abc", false);
//!
//! let mut navigator = Navigator::new(&tree);
//! assert_eq!(navigator.query("./d"), ["./docs/"]);
//! assert_eq!(navigator.query("./docs/r"), ["./docs/report.pdf "]);
//! ```

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::index::tree::{is_separator, split_path, PathTree};

/// Appended to a query before splitting so a trailing separator is kept.
const SENTINEL: char = '\0';

/// Completion engine bound to one tree.
#[derive(Debug)]
pub struct Navigator<'t> {
    tree: &'t PathTree,
    cache: HashMap<String, Vec<String>>,
}

impl<'t> Navigator<'t> {
    /// Create a navigator over `tree`.
    #[must_use]
    pub fn new(tree: &'t PathTree) -> Self {
        Self {
            tree,
            cache: HashMap::new(),
        }
    }

    /// Completions for `text`, memoized per exact query.
    pub fn query(&mut self, text: &str) -> &[String] {
        let tree = self.tree;
        self.cache
            .entry(text.to_string())
            .or_insert_with(|| complete(tree, text))
    }

    /// Number of distinct queries answered so far.
    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

fn complete(tree: &PathTree, text: &str) -> Vec<String> {
    let with_sentinel = format!("{text}{SENTINEL}");
    let split = split_path(&with_sentinel);
    let partial = split.name.strip_suffix(SENTINEL).unwrap_or(split.name);

    let Some(children) = tree.children(split.parent) else {
        log::trace!("No directory {:?} for query {:?}", split.parent, text);
        return Vec::new();
    };

    let mut matches: Vec<String> = children
        .iter()
        .filter(|child| child.name.starts_with(partial))
        .map(|child| format!("{}{}", split.parent, child.name))
        .collect();

    if let [single] = matches.as_mut_slice() {
        if !single.ends_with(is_separator) {
            single.push(' ');
        }
    }

    matches
}

/// Answer one query per input line until end of input.
///
/// Each completion is written on its own line, followed by an empty line
/// that terminates the answer. Returns the number of queries answered.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_session<R: BufRead, W: Write>(
    navigator: &mut Navigator<'_>,
    input: R,
    mut output: W,
) -> io::Result<usize> {
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        let query = line.trim_end_matches('\r');
        for completion in navigator.query(query) {
            writeln!(output, "{}", completion)?;
        }
        writeln!(output)?;
        output.flush()?;
        answered += 1;
    }
    log::debug!(
        "Session ended after {} queries ({} distinct)",
        answered,
        navigator.cached_queries()
    );
    Ok(answered)
}
