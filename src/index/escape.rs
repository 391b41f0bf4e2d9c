//! Space escaping for index paths.
//!
//! The index format is consumed by tools that split on whitespace, so the scanner
//! never writes a literal space into a path. Spaces become the two-character token
//! `^_` and carets are doubled so the token stays unambiguous.
//!
//! # Example
//!
//! ```
//! use dirdupe::index::escape::{escape, unescape};
//!
//! let escaped = escape("My Documents/a^b.txt");
//! assert_eq!(escaped, "My^_Documents/a^^b.txt");
//! assert_eq!(unescape(&escaped), "My Documents/a^b.txt");
//! ```

/// Escape character; doubled when it appears literally.
pub const ESCAPE_CHAR: char = '^';

/// Token that stands for a single space in escaped text.
pub const SPACE_TOKEN: &str = "^_";

/// Escape a path so it contains no literal space.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace(ESCAPE_CHAR, "^^").replace(' ', SPACE_TOKEN)
}

/// Reverse [`escape`].
///
/// A `^_` preceded by an odd run of carets is a literal caret followed by an
/// underscore, not a space; scanning pairs left to right gives exactly that.
/// A lone trailing caret (malformed input) is kept as is.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESCAPE_CHAR {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                chars.next();
                out.push(ESCAPE_CHAR);
            }
            Some('_') => {
                chars.next();
                out.push(' ');
            }
            _ => out.push(ESCAPE_CHAR),
        }
    }

    out
}

/// Unescape a path and quote it for display in reports.
#[must_use]
pub fn display_path(text: &str) -> String {
    format!("\"{}\"", unescape(text))
}
