//! Integration tests for config file loading and layer precedence.
//!
//! Covers:
//! - Explicit config files feeding the pipeline
//! - CLI overrides taking precedence over file values
//! - Null file values falling through to lower layers
//! - The optional default config path
//! - File errors staying outside the taxonomy exit codes

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use train_harness::config::{ConfigSources, DEFAULT_CONFIG_PATH};
use train_harness::error::HarnessError;
use train_harness::pipeline::Pipeline;
use train_harness::registry::HarnessRegistry;

/// Complete file for the lit-simple-args / lit-rnn pair.
fn simple_rnn_yaml() -> &'static str {
    r#"task:
  datadir: data/
  batch_size: 32
  num_workers: 4
model:
  vocab_size: 10000
  embedding_dim: 128
  hidden_size: 256
  nonlinearity: tanh
  dropout: 0.1
  learn_rate: 0.001
controller:
  max_epochs: 10
  patience: 3
  seed: 1234
  experiment: baseline
  deterministic: true
"#
}

fn full_override_args() -> Vec<String> {
    [
        "task.datadir=data/",
        "task.batch_size=32",
        "task.num_workers=4",
        "model.vocab_size=10000",
        "model.embedding_dim=128",
        "model.hidden_size=256",
        "model.nonlinearity=tanh",
        "model.dropout=0.1",
        "model.learn_rate=0.001",
        "controller.max_epochs=10",
        "controller.patience=3",
        "controller.seed=1234",
        "controller.experiment=baseline",
        "controller.deterministic=true",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("conf.yaml");
    fs::write(&path, contents).expect("write config file");
    path
}

#[test]
fn file_values_feed_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, simple_rnn_yaml());
    let sources = ConfigSources::gather(Some(&path), &[]).unwrap();

    let registry = HarnessRegistry::builtin().unwrap();
    let run = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap();
    assert_eq!(run.config.task.get_int("batch_size").unwrap(), 32);
    assert_eq!(run.config.model.get_str("nonlinearity").unwrap(), "tanh");
    assert_eq!(run.config.controller.get_str("experiment").unwrap(), "baseline");
}

#[test]
fn overrides_beat_file_values() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, simple_rnn_yaml());
    let overrides = vec![
        "task.batch_size=64".to_string(),
        "controller.experiment=tuned".to_string(),
    ];
    let sources = ConfigSources::gather(Some(&path), &overrides).unwrap();

    let registry = HarnessRegistry::builtin().unwrap();
    let run = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap();
    assert_eq!(run.config.task.get_int("batch_size").unwrap(), 64);
    assert_eq!(run.config.controller.get_str("experiment").unwrap(), "tuned");
    // Fields without an override keep the file's value.
    assert_eq!(run.config.task.get_int("num_workers").unwrap(), 4);
}

#[test]
fn file_and_overrides_complete_each_other() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"task:
  datadir: data/
  batch_size: 8
  num_workers: 0
controller:
  max_epochs: 1
  patience: 1
  seed: 0
  experiment: smoke
  deterministic: false
"#,
    );
    let overrides = vec![
        "model.vocab_size=500".to_string(),
        "model.embedding_dim=16".to_string(),
        "model.hidden_size=32".to_string(),
        "model.nonlinearity=relu".to_string(),
        "model.dropout=0".to_string(),
        "model.learn_rate=0.01".to_string(),
    ];
    let sources = ConfigSources::gather(Some(&path), &overrides).unwrap();

    let registry = HarnessRegistry::builtin().unwrap();
    let run = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap();
    assert_eq!(run.config.task.get_int("batch_size").unwrap(), 8);
    assert_eq!(run.config.model.get_int("vocab_size").unwrap(), 500);
    assert_eq!(run.config.model.get_float("dropout").unwrap(), 0.0);
}

#[test]
fn null_file_values_mean_not_specified() {
    let dir = TempDir::new().unwrap();
    let yaml = simple_rnn_yaml().replace("datadir: data/", "datadir: null");
    let path = write_config(&dir, &yaml);
    let sources = ConfigSources::gather(Some(&path), &[]).unwrap();

    let registry = HarnessRegistry::builtin().unwrap();
    let err = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap_err();
    assert_eq!(err, HarnessError::missing_fields(vec!["task.datadir".into()]));
}

#[test]
fn default_config_path_is_used_when_present() {
    // Cargo runs test binaries from the package root, where the demo
    // config ships.
    assert!(Path::new(DEFAULT_CONFIG_PATH).exists());
    let sources = ConfigSources::gather(None, &[]).unwrap();
    assert!(sources.file.iter().any(|(path, _)| path == "task.datadir"));

    let registry = HarnessRegistry::builtin().unwrap();
    let run = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap();
    assert_eq!(run.config.controller.get_str("experiment").unwrap(), "baseline");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = ConfigSources::gather(Some(&path), &[]).unwrap_err();
    // File problems are not part of the config error taxonomy.
    assert!(err.downcast_ref::<HarnessError>().is_none());
}

#[test]
fn malformed_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "task: [unclosed");
    let err = ConfigSources::gather(Some(&path), &[]).unwrap_err();
    assert!(err.downcast_ref::<HarnessError>().is_none());
    assert!(format!("{err:#}").contains("conf.yaml"));
}

#[test]
fn non_mapping_section_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "task: 3\n");
    let err = ConfigSources::gather(Some(&path), &[]).unwrap_err();
    assert!(format!("{err:#}").contains("must be a mapping"));
}

#[test]
fn unknown_file_field_maps_to_an_override_error() {
    let dir = TempDir::new().unwrap();
    let yaml =
        simple_rnn_yaml().replace("  num_workers: 4\n", "  num_workers: 4\n  batchsize: 1\n");
    let path = write_config(&dir, &yaml);
    let sources = ConfigSources::gather(Some(&path), &[]).unwrap();

    let registry = HarnessRegistry::builtin().unwrap();
    let err = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap_err();
    assert!(matches!(err, HarnessError::Override { .. }));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn empty_file_is_a_no_op_layer() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");
    let sources = ConfigSources::gather(Some(&path), &full_override_args()).unwrap();
    assert!(sources.file.is_empty());

    let registry = HarnessRegistry::builtin().unwrap();
    let run = Pipeline::new(&registry)
        .prepare("lit-simple-args", "lit-rnn", &sources)
        .unwrap();
    assert_eq!(run.config.model.get_int("vocab_size").unwrap(), 10000);
}
