use std::fs;

use dirdupe::index::{FileIndex, IndexError};
use dirdupe::progress::{LoadProgress, NoProgress};
use std::time::Duration;
use tempfile::tempdir;

use super::common::{dir, line, load, write_index, T};

#[test]
fn test_load_counts_record_kinds() {
    let index = load(&[
        dir("."),
        dir("./docs"),
        line("./docs/a.txt", "h1", 100),
        line("./docs/b.txt", "h1", 100),
        line("./docs/locked.db", "failed", 4096),
        line("./notes.txt", "h2", 7),
    ]);

    let stats = index.stats();
    assert_eq!(stats.lines, 6);
    assert_eq!(stats.directories, 2);
    assert_eq!(stats.files, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.total_bytes, 207);
}

#[test]
fn test_directories_and_failed_not_in_content() {
    let index = load(&[
        dir("./docs"),
        line("./docs/locked.db", "failed", 4096),
        line("./docs/other.db", "failed", 4096),
        line("./docs/a.txt", "h1", 10),
    ]);

    assert_eq!(index.content().len(), 1);
    assert!(index.content().get("").is_none());
    assert!(index.content().get("failed").is_none());

    // Unreadable files still show up for navigation.
    let names: Vec<&str> = index
        .tree()
        .children("./docs/")
        .unwrap()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["locked.db", "other.db", "a.txt"]);
}

#[test]
fn test_malformed_lines_skipped() {
    let data = vec![
        "not a record\n".to_string(),
        format!("./x\th\tbig\t{T}\t{T}\n"),
        "\n".to_string(),
        format!("./x\th\t1\t{T}\n"),
        line("./ok", "h", 1),
    ];
    let index = load(&data);

    assert_eq!(index.stats().skipped, 3);
    assert_eq!(index.stats().files, 1);
    assert_eq!(index.content().get("h").unwrap().len(), 1);
}

#[test]
fn test_crlf_and_creation_time() {
    let data = vec![
        format!("./a\th\t5\t{T}\t{T}\t{T}\r\n"),
        format!("./b\th\t5\t{T}\t{T}\r\n"),
    ];
    let index = load(&data);

    let group = index.content().get("h").unwrap();
    assert_eq!(group.size, 5);
    assert!(group.paths["./a"].created.is_some());
    assert!(group.paths["./b"].created.is_none());
}

#[test]
fn test_size_conflict_keeps_latest() {
    let index = load(&[line("./a", "h", 10), line("./b", "h", 12)]);

    assert_eq!(index.stats().size_conflicts, 1);
    let group = index.content().get("h").unwrap();
    assert_eq!(group.size, 12);
    assert_eq!(group.len(), 2);
}

#[test]
fn test_repeated_path_counted_once() {
    let index = load(&[line("./a", "h", 10), line("./a", "h", 10)]);
    assert!(!index.content().get("h").unwrap().is_duplicate());
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("index.txt");
    let mut bytes = b"./caf\xe9\th\t3\tT\tT\n".to_vec();
    bytes.extend_from_slice(b"./cafe\th\t3\tT\tT\n");
    fs::write(&path, bytes).unwrap();

    let index = FileIndex::open(&path, &mut NoProgress).unwrap();
    assert_eq!(index.stats().files, 2);
    assert!(index.content().get("h").unwrap().is_duplicate());
}

#[test]
fn test_missing_file_is_open_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("missing.txt");

    let err = FileIndex::open(&missing, &mut NoProgress).unwrap_err();
    assert!(matches!(err, IndexError::Open { .. }));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn test_progress_sees_every_record() {
    let (_temp, path) = write_index(&[
        dir("./d"),
        line("./d/a", "h1", 100),
        line("./d/b", "h2", 50),
    ]);
    let mut progress = LoadProgress::new(Duration::from_secs(3600));

    FileIndex::open(&path, &mut progress).unwrap();

    assert_eq!(progress.records(), 3);
    assert_eq!(progress.bytes(), 150);
}
