#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::{fs, path::PathBuf};

use docanchor_config::{Config, ConfigError, templates::TemplateError};
use tempfile::tempdir;

#[test]
fn test_from_file_toml_and_json() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");

  let toml_path = temp_dir.path().join("docanchor.toml");
  fs::write(&toml_path, "anchor_symbol = \"¶\"\ntoc_max_level = 3\n")
    .expect("Failed to write config in test");
  let config = Config::from_file(&toml_path).expect("TOML config loads");
  assert_eq!(config.anchor_symbol, "¶");
  assert_eq!(config.toc_max_level, 3);
  assert_eq!(config.output_dir, PathBuf::from("build"));

  let json_path = temp_dir.path().join("docanchor.json");
  fs::write(&json_path, r#"{ "skip_code_fences": true, "jobs": 2 }"#)
    .expect("Failed to write config in test");
  let config = Config::from_file(&json_path).expect("JSON config loads");
  assert!(config.skip_code_fences);
  assert_eq!(config.jobs, Some(2));
}

#[test]
fn test_from_file_errors() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");

  let yaml = temp_dir.path().join("docanchor.yaml");
  fs::write(&yaml, "a: b").expect("Failed to write config in test");
  let err = Config::from_file(&yaml).expect_err("yaml is unsupported");
  assert!(err.to_string().contains("Unsupported config file format"));

  let bare = temp_dir.path().join("docanchor");
  fs::write(&bare, "").expect("Failed to write config in test");
  let err = Config::from_file(&bare).expect_err("no extension");
  assert!(err.to_string().contains("no extension"));

  let broken = temp_dir.path().join("broken.toml");
  fs::write(&broken, "toc_max_level = \"six\"").expect("Failed to write in test");
  let err = Config::from_file(&broken).expect_err("wrong type");
  assert!(matches!(&err, ConfigError::Toml { path, .. } if path == &broken));

  let broken_json = temp_dir.path().join("broken.json");
  fs::write(&broken_json, "{ \"jobs\": ").expect("Failed to write in test");
  let err = Config::from_file(&broken_json).expect_err("truncated JSON");
  assert!(matches!(err, ConfigError::Json { .. }));
  assert!(err.to_string().contains("broken.json"));

  let missing = temp_dir.path().join("missing.toml");
  let err = Config::from_file(&missing).expect_err("missing file");
  assert!(matches!(&err, ConfigError::Read { path, .. } if path == &missing));
}

#[test]
fn test_load_merges_in_order_then_overrides() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let base = temp_dir.path().join("base.toml");
  let extra = temp_dir.path().join("extra.json");
  fs::write(&base, "input_dir = \"docs\"\nanchor_symbol = \"§\"\n")
    .expect("Failed to write config in test");
  fs::write(&extra, r#"{ "anchor_symbol": "¶", "toc_min_level": 2 }"#)
    .expect("Failed to write config in test");

  let config = Config::load(&[base, extra], &["toc_max_level=4".to_string()])
    .expect("configs load");

  assert_eq!(config.input_dir, Some(PathBuf::from("docs")));
  assert_eq!(config.anchor_symbol, "¶");
  assert_eq!(config.toc_min_level, 2);
  assert_eq!(config.toc_max_level, 4);
}

#[test]
fn test_load_rejects_invalid_result() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("bad.toml");
  fs::write(&path, "copy_link_attribute = \"onclick\"\n")
    .expect("Failed to write config in test");

  let err = Config::load(&[path], &[]).expect_err("validation fails");
  assert!(err.to_string().contains("copy_link_attribute"));
}

#[test]
fn test_generate_default_config() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");

  for format in ["toml", "json"] {
    let path = temp_dir.path().join(format!("docanchor.{format}"));
    Config::generate_default_config(format, &path)
      .expect("default config is written");
    let config = Config::from_file(&path).expect("generated config loads");
    assert_eq!(config.input_dir, Some(PathBuf::from("docs")));
    assert!(config.validate().is_ok());
  }

  let err = Config::generate_default_config("ini", &temp_dir.path().join("x"))
    .expect_err("ini is unsupported");
  assert!(matches!(
    err,
    ConfigError::Template(TemplateError::UnsupportedFormat(_))
  ));

  let unwritable = temp_dir.path().join("no-such-dir/docanchor.toml");
  let err = Config::generate_default_config("toml", &unwritable)
    .expect_err("parent directory is missing");
  assert!(matches!(err, ConfigError::Write { .. }));
}
