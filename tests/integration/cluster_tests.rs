use dirdupe::duplicates::{Analyzer, ClusterConfig};

use super::common::{line, load, MIB};

fn git_objects(objects: &[(&str, u64)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (hash, size) in objects {
        for project in ["p1", "p2", "p3"] {
            lines.push(line(
                &format!("./{project}/.git/o/00/{hash}"),
                hash,
                *size,
            ));
        }
    }
    lines
}

#[test]
fn test_parallel_checkouts_become_one_cluster() {
    let index = load(&git_objects(&[("aa", 10), ("bb", 20), ("cc", 3 * MIB)]));
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
    let report = analyzer.clusters();

    assert_eq!(report.clusters.len(), 1);
    let cluster = &report.clusters[0];
    assert_eq!(cluster.directories, ["./p1/", "./p2/", "./p3/"]);
    assert_eq!(cluster.occurrences, 3);
    assert_eq!(cluster.wasted, 2 * (10 + 20 + 3 * MIB));
    assert_eq!(report.absorbed_groups, 3);

    // The large object is part of the cluster, not a file-level entry.
    assert!(report.residual.is_empty());
}

#[test]
fn test_min_prefix_parts_limits_compression() {
    let index = load(&git_objects(&[("aa", 10), ("bb", 20)]));
    let config = ClusterConfig {
        min_prefix_parts: 4,
        ..ClusterConfig::default()
    };
    let analyzer = Analyzer::new(index.content(), config);
    let report = analyzer.clusters();

    assert_eq!(report.clusters.len(), 1);
    assert_eq!(
        report.clusters[0].directories,
        ["./p1/.git/o/00/", "./p2/.git/o/00/", "./p3/.git/o/00/"]
    );
}

#[test]
fn test_residual_threshold_is_configurable() {
    let index = load(&[line("./a/x", "h", 1000), line("./b/x", "h", 1000)]);

    let default = Analyzer::new(index.content(), ClusterConfig::default());
    assert!(default.clusters().residual.is_empty());

    let config = ClusterConfig {
        residual_threshold: 999,
        ..ClusterConfig::default()
    };
    let low = Analyzer::new(index.content(), config);
    assert_eq!(low.clusters().residual.len(), 1);
    assert_eq!(low.clusters().residual[0].hash, "h");
}

#[test]
fn test_residual_inside_clustered_directories_hidden() {
    let mut lines = vec![
        line("./a/1", "h1", 10),
        line("./b/1", "h1", 10),
        line("./a/2", "h2", 10),
        line("./b/2", "h2", 10),
    ];
    // Nested under the clustered directories, with its own signature.
    lines.push(line("./a/sub/big", "h3", 5 * MIB));
    lines.push(line("./b/big", "h3", 5 * MIB));
    // Elsewhere entirely.
    lines.push(line("./c/big", "h4", 4 * MIB));
    lines.push(line("./d/big", "h4", 4 * MIB));
    let index = load(&lines);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
    let report = analyzer.clusters();

    assert_eq!(report.clusters.len(), 1);
    let residual: Vec<&str> = report.residual.iter().map(|e| e.hash).collect();
    assert_eq!(residual, ["h4"]);
}

#[test]
fn test_backslash_paths_cluster_like_slashes() {
    let index = load(&[
        line(".\\p1\\x", "h1", 10),
        line(".\\p2\\x", "h1", 10),
        line(".\\p1\\y", "h2", 10),
        line(".\\p2\\y", "h2", 10),
    ]);
    let analyzer = Analyzer::new(index.content(), ClusterConfig::default());
    let report = analyzer.clusters();

    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.clusters[0].directories, ["./p1/", "./p2/"]);
}
