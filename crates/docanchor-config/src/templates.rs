use thiserror::Error;

use crate::config::Config;

/// Error type for template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),

  #[error("Failed to serialize defaults: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Default configuration in TOML, commented so a fresh file explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r##"# docanchor configuration file

# Directory scanned recursively for markdown files
input_dir = "docs"

# Output directory for processed fragments and TOC files
output_dir = "build"

# Number of threads to use for parallel processing (defaults to number of CPU cores)
# jobs = 4

# Class set on every rewritten heading element
heading_class = "anchored-heading"

# Class, content and accessible label of the copy-link control
anchor_class = "header-anchor"
anchor_symbol = "#"
anchor_label = "Copy link to this section"

# Data attribute carrying the "#slug" anchor; the page script binds the
# copy-link handler to elements with this attribute
copy_link_attribute = "data-copy-link"

# Do not treat lines inside fenced code blocks as headings
skip_code_fences = false

# Heading levels included in rendered tables of contents
toc_min_level = 1
toc_max_level = 6
"##;

/// Get the default configuration in the given format.
///
/// # Errors
///
/// Returns an error if the format is not `toml` or `json`.
pub fn get_template(format: &str) -> Result<String, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE.to_string()),
    "json" => {
      let defaults = Config {
        input_dir: Some("docs".into()),
        ..Config::default()
      };
      Ok(serde_json::to_string_pretty(&defaults)?)
    },
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
