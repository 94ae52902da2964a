//! Type definitions for the header processor.
//!
//! Contains all the core types used by the processor, including:
//! - Configuration options (`HeaderOptions`)
//! - The main processor struct (`HeaderProcessor`)
//! - The heading markup seam (`HeadingRenderer`) and its default
//!   implementation
//!
//! # Examples
//!
//! ```
//! use docanchor_headers::{HeaderOptions, HeaderProcessor};
//!
//! let options = HeaderOptions {
//!   anchor_symbol: "¶".to_string(),
//!   skip_code_fences: true,
//!   ..Default::default()
//! };
//!
//! let processor = HeaderProcessor::new(options);
//! ```

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::types::HeadingRecord;

pub const DEFAULT_HEADING_CLASS: &str = "anchored-heading";
pub const DEFAULT_ANCHOR_CLASS: &str = "header-anchor";
pub const DEFAULT_ANCHOR_SYMBOL: &str = "#";
pub const DEFAULT_ANCHOR_LABEL: &str = "Copy link to this section";
pub const DEFAULT_COPY_LINK_ATTRIBUTE: &str = "data-copy-link";

/// Options for configuring the header processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
  /// Class set on every rewritten heading element.
  pub heading_class: String,

  /// Class set on the copy-link control.
  pub anchor_class: String,

  /// Visible content of the copy-link control.
  pub anchor_symbol: String,

  /// Accessible label of the copy-link control.
  pub anchor_label: String,

  /// Data attribute carrying the `#slug` anchor. The rendering layer binds
  /// its copy-link handler to elements with this attribute.
  pub copy_link_attribute: String,

  /// Never treat lines inside fenced code blocks as headings.
  pub skip_code_fences: bool,
}

impl Default for HeaderOptions {
  fn default() -> Self {
    Self {
      heading_class:       DEFAULT_HEADING_CLASS.to_string(),
      anchor_class:        DEFAULT_ANCHOR_CLASS.to_string(),
      anchor_symbol:       DEFAULT_ANCHOR_SYMBOL.to_string(),
      anchor_label:        DEFAULT_ANCHOR_LABEL.to_string(),
      copy_link_attribute: DEFAULT_COPY_LINK_ATTRIBUTE.to_string(),
      skip_code_fences:    false,
    }
  }
}

impl HeaderOptions {
  /// The copy-link attribute name, or the default if the configured one is
  /// not a plain `data-*` attribute.
  #[must_use]
  pub fn copy_link_attribute_name(&self) -> &str {
    if is_data_attribute(&self.copy_link_attribute) {
      &self.copy_link_attribute
    } else {
      log::warn!(
        "Ignoring invalid copy link attribute '{}', using '{}'",
        self.copy_link_attribute,
        DEFAULT_COPY_LINK_ATTRIBUTE
      );
      DEFAULT_COPY_LINK_ATTRIBUTE
    }
  }
}

/// Whether `name` is a `data-*` attribute made of ASCII alphanumerics and
/// hyphens.
#[must_use]
pub fn is_data_attribute(name: &str) -> bool {
  name.len() > "data-".len()
    && name.starts_with("data-")
    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Main header processor.
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HeaderProcessor {
  pub(crate) options: HeaderOptions,
}

/// Trait for turning a heading record into the markup that replaces its
/// source line.
pub trait HeadingRenderer {
  fn render(&self, record: &HeadingRecord) -> String;
}

/// Default renderer: a heading element carrying the slug as its `id`,
/// followed by a copy-link button that exposes the anchor through a data
/// attribute.
///
/// ```html
/// <h2 id="setup" class="anchored-heading">Setup<button type="button" class="header-anchor" data-copy-link="#setup" aria-label="Copy link to this section">#</button></h2>
/// ```
pub struct AnchorButtonRenderer<'a> {
  options: &'a HeaderOptions,
}

impl<'a> AnchorButtonRenderer<'a> {
  #[must_use]
  pub const fn new(options: &'a HeaderOptions) -> Self {
    Self { options }
  }
}

impl HeadingRenderer for AnchorButtonRenderer<'_> {
  fn render(&self, record: &HeadingRecord) -> String {
    let level = record.level;
    let slug = encode_double_quoted_attribute(&record.slug);
    let text = encode_text(&record.text);
    let heading_class =
      encode_double_quoted_attribute(&self.options.heading_class);
    let anchor_class = encode_double_quoted_attribute(&self.options.anchor_class);
    let label = encode_double_quoted_attribute(&self.options.anchor_label);
    let symbol = encode_text(&self.options.anchor_symbol);
    let attribute = self.options.copy_link_attribute_name();

    format!(
      "<h{level} id=\"{slug}\" class=\"{heading_class}\">{text}<button \
       type=\"button\" class=\"{anchor_class}\" {attribute}=\"#{slug}\" \
       aria-label=\"{label}\">{symbol}</button></h{level}>"
    )
  }
}

/// Builder for constructing `HeaderOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct HeaderOptionsBuilder {
  options: HeaderOptions,
}

impl HeaderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn heading_class<S: Into<String>>(mut self, class: S) -> Self {
    self.options.heading_class = class.into();
    self
  }

  #[must_use]
  pub fn anchor_class<S: Into<String>>(mut self, class: S) -> Self {
    self.options.anchor_class = class.into();
    self
  }

  #[must_use]
  pub fn anchor_symbol<S: Into<String>>(mut self, symbol: S) -> Self {
    self.options.anchor_symbol = symbol.into();
    self
  }

  #[must_use]
  pub fn anchor_label<S: Into<String>>(mut self, label: S) -> Self {
    self.options.anchor_label = label.into();
    self
  }

  /// Set the data attribute that carries the anchor string.
  #[must_use]
  pub fn copy_link_attribute<S: Into<String>>(mut self, attribute: S) -> Self {
    self.options.copy_link_attribute = attribute.into();
    self
  }

  /// Enable or disable skipping of fenced code blocks.
  #[must_use]
  pub const fn skip_code_fences(mut self, enabled: bool) -> Self {
    self.options.skip_code_fences = enabled;
    self
  }

  /// Build the final `HeaderOptions`.
  #[must_use]
  pub fn build(self) -> HeaderOptions {
    self.options
  }
}
