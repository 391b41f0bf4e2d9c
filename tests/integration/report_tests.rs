use dirdupe::duplicates::{Analyzer, ClusterConfig};
use dirdupe::output::{JsonReport, ReportOptions, TextReport};

use super::common::{dir, line, load, MIB};

#[test]
fn test_wasted_space_per_cluster_size() {
    let index = load(&[
        line("./a/one", "h1", 1),
        line("./b/one", "h1", 1),
        line("./c/one", "h1", 1),
        line("./a/big", "h2", 5000),
        line("./b/big", "h2", 5000),
    ]);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());

    // h1: 2 redundant 1-byte copies; h2: 1 redundant 5000-byte copy.
    assert_eq!(analyzer.wasted_space(&[1, 4096]), vec![5002, 2 * 4096 + 8192]);
    assert_eq!(analyzer.wasted_space(&[1]), vec![5002]);
}

#[test]
fn test_ranking_and_best_entries() {
    let index = load(&[
        line("./a/empty", "e", 0),
        line("./b/empty", "e", 0),
        line("./a/small", "s", 10),
        line("./b/small", "s", 10),
        line("./c/small", "s", 10),
        line("./a/large", "l", 100),
        line("./b/large", "l", 100),
        line("./a/unique", "u", 999),
    ]);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());

    let hashes: Vec<&str> = analyzer.sorted_duplicates().iter().map(|e| e.hash).collect();
    assert_eq!(hashes, ["l", "s", "e"]);

    let best = analyzer.best();
    assert_eq!(best.len(), 2);
    assert_eq!(best[0].label, "100 B");
    assert_eq!(best[1].label, "20 B = 2*10 B");
    assert_eq!(best[1].redundant_copies, 2);
}

#[test]
fn test_text_report_end_to_end() {
    let index = load(&[
        dir("."),
        dir("./a"),
        dir("./b"),
        line("./a/movie^_1.mkv", "m", 3 * MIB),
        line("./b/movie^_1.mkv", "m", 3 * MIB),
        line("./a/readme", "r", 10),
        line("./b/readme", "r", 10),
    ]);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
    let text = TextReport::new(&analyzer, index.stats(), &ReportOptions::default())
        .render()
        .unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("3 MiB / 3.004 MiB wasted"));
    assert!(text.contains("1 duplicate directory clusters absorb 2 duplicate groups"));
    assert!(text.contains("\"./a/\" \"./b/\""));
    assert!(!text.contains("movie 1.mkv\" \"./b"));
}

#[test]
fn test_json_report_end_to_end() {
    let index = load(&[
        line("./a/x", "h", 3 * MIB),
        line("./b/y", "h", 3 * MIB),
    ]);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
    let mut json = Vec::new();
    JsonReport::new(&analyzer, index.stats(), &ReportOptions::default())
        .write_to(&mut json, false)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(value["summary"]["duplicate_groups"], 1);
    assert_eq!(value["summary"]["wasted"][0]["display"], "3 MiB");
    assert_eq!(value["duplicates"][0]["paths"][0], "./a/x");
    assert_eq!(value["duplicates"][0]["paths"][1], "./b/y");
}

#[test]
fn test_refresh_recomputes() {
    let index = load(&[line("./a", "h", 4), line("./b", "h", 4)]);
    let mut analyzer = Analyzer::new(index.content(), ClusterConfig::default());

    let before = analyzer.wasted_space(&[1]);
    analyzer.refresh();
    assert_eq!(analyzer.wasted_space(&[1]), before);
    assert_eq!(analyzer.sorted_duplicates().len(), 1);
}
