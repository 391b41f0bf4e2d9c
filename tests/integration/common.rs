use std::fs;
use std::path::PathBuf;

use dirdupe::index::FileIndex;
use dirdupe::progress::NoProgress;
use tempfile::TempDir;

pub const T: &str = "2023-03-01T12:00:00Z";
pub const MIB: u64 = 1024 * 1024;

/// One index line: path, hash, size and fixed timestamps.
pub fn line(path: &str, hash: &str, size: u64) -> String {
    format!("{path}\t{hash}\t{size}\t{T}\t{T}\n")
}

/// Directory record line.
pub fn dir(path: &str) -> String {
    line(path, "", 0)
}

/// Write `lines` to `index.txt` inside a fresh temp dir.
pub fn write_index(lines: &[String]) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index.txt");
    fs::write(&path, lines.concat()).unwrap();
    (temp, path)
}

/// Load `lines` through a real file.
pub fn load(lines: &[String]) -> FileIndex {
    let (_temp, path) = write_index(lines);
    FileIndex::open(&path, &mut NoProgress).unwrap()
}
