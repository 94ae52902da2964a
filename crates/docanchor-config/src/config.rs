use std::{
  fs,
  path::{Path, PathBuf},
};

use docanchor_headers::{
  HeaderOptions,
  processor::types::{
    DEFAULT_ANCHOR_CLASS,
    DEFAULT_ANCHOR_LABEL,
    DEFAULT_ANCHOR_SYMBOL,
    DEFAULT_COPY_LINK_ATTRIBUTE,
    DEFAULT_HEADING_CLASS,
    is_data_attribute,
  },
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for docanchor.
///
/// Holds the options that control heading markup, table of contents output
/// and batch processing. Fields are typically loaded from a TOML or JSON
/// config file, and can be overridden with `--config KEY=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Input directory containing markdown files.
  pub input_dir: Option<PathBuf>,

  /// Output directory for processed fragments and TOC files.
  pub output_dir: PathBuf,

  /// Number of threads to use for parallel processing.
  pub jobs: Option<usize>,

  /// Class set on every rewritten heading element.
  pub heading_class: String,

  /// Class set on the copy-link control.
  pub anchor_class: String,

  /// Visible content of the copy-link control.
  pub anchor_symbol: String,

  /// Accessible label of the copy-link control.
  pub anchor_label: String,

  /// Data attribute carrying the `#slug` anchor.
  pub copy_link_attribute: String,

  /// Whether lines inside fenced code blocks are ignored.
  pub skip_code_fences: bool,

  /// Shallowest heading level included in rendered tables of contents.
  pub toc_min_level: u8,

  /// Deepest heading level included in rendered tables of contents.
  pub toc_max_level: u8,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:           None,
      output_dir:          PathBuf::from("build"),
      jobs:                None,
      heading_class:       DEFAULT_HEADING_CLASS.to_string(),
      anchor_class:        DEFAULT_ANCHOR_CLASS.to_string(),
      anchor_symbol:       DEFAULT_ANCHOR_SYMBOL.to_string(),
      anchor_label:        DEFAULT_ANCHOR_LABEL.to_string(),
      copy_link_attribute: DEFAULT_COPY_LINK_ATTRIBUTE.to_string(),
      skip_code_fences:    false,
      toc_min_level:       1,
      toc_max_level:       6,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    };

    match ext.to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      "toml" => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from files and overrides.
  ///
  /// Explicit config files are merged in order, later files taking
  /// precedence. Without any, a config file is discovered in the working
  /// directory; failing that, defaults are used. Overrides are applied last
  /// and the result is validated.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid, or
  /// the final configuration fails validation.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;

      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }

      if !rest.is_empty() {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - Plain fields (String, bool, etc.): Other's value always replaces
  pub fn merge(&mut self, other: Self) {
    if other.input_dir.is_some() {
      self.input_dir = other.input_dir;
    }
    if other.jobs.is_some() {
      self.jobs = other.jobs;
    }
    self.output_dir = other.output_dir;
    self.heading_class = other.heading_class;
    self.anchor_class = other.anchor_class;
    self.anchor_symbol = other.anchor_symbol;
    self.anchor_label = other.anchor_label;
    self.copy_link_attribute = other.copy_link_attribute;
    self.skip_code_fences = other.skip_code_fences;
    self.toc_min_level = other.toc_min_level;
    self.toc_max_level = other.toc_max_level;
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```rust
  /// use docanchor_config::Config;
  ///
  /// let mut config = Config::default();
  /// config
  ///   .apply_overrides(&["skip_code_fences=true".to_string()])
  ///   .unwrap();
  /// assert!(config.skip_code_fences);
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// An empty value clears optional fields.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "input_dir" => {
        self.input_dir = (!value.is_empty()).then(|| PathBuf::from(value));
      },
      "output_dir" => self.output_dir = PathBuf::from(value),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(parse_value(key, value)?)
        };
      },
      "heading_class" => self.heading_class = value.to_string(),
      "anchor_class" => self.anchor_class = value.to_string(),
      "anchor_symbol" => self.anchor_symbol = value.to_string(),
      "anchor_label" => self.anchor_label = value.to_string(),
      "copy_link_attribute" => self.copy_link_attribute = value.to_string(),
      "skip_code_fences" => self.skip_code_fences = parse_bool(key, value)?,
      "toc_min_level" => self.toc_min_level = parse_value(key, value)?,
      "toc_max_level" => self.toc_max_level = parse_value(key, value)?,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }
    Ok(())
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let config_filenames = [
      "docanchor.toml",
      "docanchor.json",
      ".docanchor.toml",
      ".docanchor.json",
      ".github/docanchor.toml",
      ".github/docanchor.json",
    ];

    let current_dir = std::env::current_dir().ok()?;
    config_filenames
      .iter()
      .map(|filename| current_dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Check option values that serde cannot check on its own.
  ///
  /// # Errors
  ///
  /// Returns every problem found, one per line.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    for (name, level) in [
      ("toc_min_level", self.toc_min_level),
      ("toc_max_level", self.toc_max_level),
    ] {
      if !(1..=6).contains(&level) {
        errors.push(format!("{name} must be between 1 and 6, got {level}"));
      }
    }
    if self.toc_min_level > self.toc_max_level {
      errors.push(format!(
        "toc_min_level ({}) is greater than toc_max_level ({})",
        self.toc_min_level, self.toc_max_level
      ));
    }

    if !is_data_attribute(&self.copy_link_attribute) {
      errors.push(format!(
        "copy_link_attribute must be a data-* attribute, got '{}'",
        self.copy_link_attribute
      ));
    }

    if self.jobs == Some(0) {
      errors.push("jobs must be at least 1".to_string());
    }

    if !errors.is_empty() {
      let error_message = errors.join("\n");
      return Err(ConfigError::Config(format!(
        "Configuration validation errors:\n{error_message}"
      )));
    }

    Ok(())
  }

  /// Header processor options for this configuration.
  #[must_use]
  pub fn processor_options(&self) -> HeaderOptions {
    HeaderOptions {
      heading_class:       self.heading_class.clone(),
      anchor_class:        self.anchor_class.clone(),
      anchor_symbol:       self.anchor_symbol.clone(),
      anchor_label:        self.anchor_label.clone(),
      copy_link_attribute: self.copy_link_attribute.clone(),
      skip_code_fences:    self.skip_code_fences,
    }
  }

  /// Generate a default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)?;

    fs::write(path, config_content).map_err(|source| {
      ConfigError::Write {
        path: path.to_path_buf(),
        source,
      }
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  value.parse().map_err(|e| {
    ConfigError::Config(format!("Invalid value '{value}' for '{key}': {e}"))
  })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" | "on" => Ok(true),
    "false" | "no" | "0" | "off" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value '{value}' for '{key}'. Expected true/false, \
         yes/no, 1/0, or on/off"
      )))
    },
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.input_dir = Some(PathBuf::from("base-input"));

    let mut override_config = Config::default();
    override_config.input_dir = None;
    override_config.jobs = Some(8);

    base.merge(override_config);

    assert_eq!(base.input_dir, Some(PathBuf::from("base-input")));
    assert_eq!(base.jobs, Some(8));
  }

  #[test]
  fn test_config_merge_plain_fields() {
    let mut base = Config::default();
    base.skip_code_fences = true;

    let mut override_config = Config::default();
    override_config.anchor_symbol = "¶".to_string();

    base.merge(override_config);

    assert_eq!(base.anchor_symbol, "¶");
    assert!(!base.skip_code_fences);
  }

  #[test]
  fn test_apply_overrides_typed() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "skip_code_fences=yes".to_string(),
        "toc_max_level = 3".to_string(),
        "jobs=4".to_string(),
        "input_dir=docs".to_string(),
        "anchor_label=Copy=link".to_string(),
      ])
      .unwrap();

    assert!(config.skip_code_fences);
    assert_eq!(config.toc_max_level, 3);
    assert_eq!(config.jobs, Some(4));
    assert_eq!(config.input_dir, Some(PathBuf::from("docs")));
    assert_eq!(config.anchor_label, "Copy=link");
  }

  #[test]
  fn test_apply_override_clears_optional() {
    let mut config = Config::default();
    config.input_dir = Some(PathBuf::from("docs"));
    config.jobs = Some(2);
    config.apply_override("input_dir", "").unwrap();
    config.apply_override("jobs", "").unwrap();
    assert_eq!(config.input_dir, None);
    assert_eq!(config.jobs, None);
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();
    let err = config
      .apply_overrides(&["no_equals_sign".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Expected KEY=VALUE"));
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();
    let err = config.apply_override("not_a_key", "1").unwrap_err();
    assert!(err.to_string().contains("Unknown configuration key"));
  }

  #[test]
  fn test_apply_overrides_invalid_values() {
    let mut config = Config::default();
    assert!(config.apply_override("skip_code_fences", "maybe").is_err());
    assert!(config.apply_override("toc_min_level", "two").is_err());
    assert!(config.apply_override("toc_min_level", "300").is_err());
  }

  #[test]
  fn test_validate() {
    assert!(Config::default().validate().is_ok());

    let mut config = Config::default();
    config.toc_min_level = 4;
    config.toc_max_level = 2;
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("greater than"));

    let mut config = Config::default();
    config.toc_max_level = 7;
    config.copy_link_attribute = "onclick".to_string();
    config.jobs = Some(0);
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("toc_max_level must be between 1 and 6"));
    assert!(err.contains("data-* attribute"));
    assert!(err.contains("jobs must be at least 1"));
  }

  #[test]
  fn test_processor_options() {
    let mut config = Config::default();
    config.anchor_symbol = "§".to_string();
    config.skip_code_fences = true;
    let options = config.processor_options();
    assert_eq!(options.anchor_symbol, "§");
    assert!(options.skip_code_fences);
    assert_eq!(options.copy_link_attribute, DEFAULT_COPY_LINK_ATTRIBUTE);
  }
}
