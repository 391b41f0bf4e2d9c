use dirdupe::config::{Config, ConfigError};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirdupe.toml");
    fs::write(
        &config_path,
        r#"
cluster_sizes = [1, 65536]
min_prefix_parts = 3
residual_threshold = 1048576
"#,
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();

    assert_eq!(config.cluster_sizes, vec![1, 65536]);
    assert_eq!(config.min_prefix_parts, 3);
    assert_eq!(config.residual_threshold, 1_048_576);
}

#[test]
fn test_load_rejects_invalid_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirdupe.toml");
    fs::write(&config_path, "cluster_sizes = [0]\n").unwrap();

    let err = Config::load(Some(config_path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroClusterSize));
}

#[test]
fn test_load_rejects_wrong_types() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirdupe.toml");
    fs::write(&config_path, "residual_threshold = \"lots\"\n").unwrap();

    let err = Config::load(Some(config_path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}

#[test]
fn test_env_layer_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("dirdupe.toml");
    fs::write(&config_path, "residual_threshold = 100\nmin_prefix_parts = 5\n").unwrap();

    // A private prefix keeps this test independent of the real environment.
    std::env::set_var("DIRDUPE_LAYER_TEST_RESIDUAL_THRESHOLD", "200");
    std::env::set_var("DIRDUPE_LAYER_TEST_CLUSTER_SIZES", "[512, 4096]");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .merge(Env::prefixed("DIRDUPE_LAYER_TEST_"));
    let config: Config = figment.extract().unwrap();

    std::env::remove_var("DIRDUPE_LAYER_TEST_RESIDUAL_THRESHOLD");
    std::env::remove_var("DIRDUPE_LAYER_TEST_CLUSTER_SIZES");

    assert_eq!(config.residual_threshold, 200);
    assert_eq!(config.min_prefix_parts, 5);
    assert_eq!(config.cluster_sizes, vec![512, 4096]);
}

#[test]
fn test_config_path_is_toml() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with("config.toml"));
    }
}
