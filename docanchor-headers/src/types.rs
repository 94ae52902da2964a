//! Types for docanchor-headers public API and internal use.
use serde::{Deserialize, Serialize};

/// A heading detected in the processed content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadingRecord {
  /// Heading level (1-6), the literal number of leading `#` characters.
  pub level:         u8,
  /// Heading text with the heading syntax and any `{#id}` annotation removed.
  pub text:          String,
  /// Resolved anchor ID, unique within a single processing call.
  pub slug:          String,
  /// The full source line the heading was parsed from.
  pub original_text: String,
}

impl HeadingRecord {
  /// In-page anchor for this heading (`#slug`).
  #[must_use]
  pub fn anchor(&self) -> String {
    format!("#{}", self.slug)
  }
}

/// Table of contents entry derived from a [`HeadingRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
  pub level:  u8,
  pub text:   String,
  pub slug:   String,
  pub anchor: String,
}

impl From<&HeadingRecord> for TocEntry {
  fn from(record: &HeadingRecord) -> Self {
    Self {
      level:  record.level,
      text:   record.text.clone(),
      slug:   record.slug.clone(),
      anchor: record.anchor(),
    }
  }
}

/// Result of header processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedContent {
  /// Input content with every heading line replaced by anchored markup.
  pub content: String,

  /// Detected headings, in source order.
  pub headers: Vec<HeadingRecord>,

  /// Text of the first level 1 heading, if any.
  pub title: Option<String>,
}

impl ProcessedContent {
  /// Split into the processed content and the heading list.
  #[must_use]
  pub fn into_parts(self) -> (String, Vec<HeadingRecord>) {
    (self.content, self.headers)
  }

  /// Derive table of contents entries for the detected headings.
  #[must_use]
  pub fn table_of_contents(&self) -> Vec<TocEntry> {
    crate::toc::generate_table_of_contents(&self.headers)
  }
}
