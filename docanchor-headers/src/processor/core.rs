//! Core implementation of the header processor.
//!
//! This module contains the main implementation of `HeaderProcessor`: heading
//! detection, slug assignment and markup injection in a single line-by-line
//! pass.
use std::{
  path::{Path, PathBuf},
  sync::LazyLock,
};

use log::{trace, warn};
use regex::Regex;
use walkdir::WalkDir;

use super::types::{
  AnchorButtonRenderer,
  HeaderOptions,
  HeaderProcessor,
  HeadingRenderer,
};
use crate::{
  types::{HeadingRecord, ProcessedContent},
  utils::{SlugTracker, codeblock::FenceTracker, regex_or_never, slugify},
};

/// 1-6 `#`, at least one whitespace character, then the (possibly empty)
/// heading text. `\s` is Unicode-aware, matching `char::is_whitespace`.
static HEADING_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never("HEADING_RE", r"^(#{1,6})\s+(.*)$"));

/// Trailing `{#id}` annotation.
static EXPLICIT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
  regex_or_never("EXPLICIT_ID_RE", r"^(.*?)\s*\{#([^\s{}]+)\}\s*$")
});

/// A heading line split into its parts, before slug resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLine<'a> {
  pub level:       u8,
  /// Visible text, trimmed, annotation removed.
  pub text:        &'a str,
  /// Slug from a trailing `{#id}` annotation.
  pub explicit_id: Option<&'a str>,
}

/// Parse a single line (without its line terminator) as a heading.
///
/// Returns `None` if the line is not a heading.
#[must_use]
pub fn parse_heading_line(line: &str) -> Option<HeadingLine<'_>> {
  let caps = HEADING_RE.captures(line)?;
  let hashes = caps.get(1)?.as_str();
  let rest = caps.get(2).map_or("", |m| m.as_str());
  let level = u8::try_from(hashes.len()).ok()?;

  let (text, explicit_id) = match EXPLICIT_ID_RE.captures(rest) {
    Some(id_caps) => {
      (
        id_caps.get(1).map_or("", |m| m.as_str()),
        id_caps.get(2).map(|m| m.as_str()),
      )
    },
    None => (rest, None),
  };

  Some(HeadingLine {
    level,
    text: text.trim(),
    explicit_id,
  })
}

/// Split a line produced by `split_inclusive('\n')` into content and
/// terminator.
fn split_line_terminator(line: &str) -> (&str, &str) {
  let body_len = line
    .strip_suffix("\r\n")
    .or_else(|| line.strip_suffix('\n'))
    .map_or(line.len(), str::len);
  line.split_at(body_len)
}

impl HeaderProcessor {
  /// Create a new `HeaderProcessor` with the given options.
  #[must_use]
  pub const fn new(options: HeaderOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &HeaderOptions {
    &self.options
  }

  /// Rewrite every heading line into anchored markup and collect the
  /// headings.
  ///
  /// Lines that are not headings, including their line terminators, are
  /// copied to the output unchanged.
  #[must_use]
  pub fn process(&self, content: &str) -> ProcessedContent {
    self.process_with_renderer(content, &AnchorButtonRenderer::new(&self.options))
  }

  /// Like [`HeaderProcessor::process`], with a custom heading renderer.
  #[must_use]
  pub fn process_with_renderer<R: HeadingRenderer + ?Sized>(
    &self,
    content: &str,
    renderer: &R,
  ) -> ProcessedContent {
    let mut output = String::with_capacity(content.len());
    let mut headers = Vec::new();

    self.scan(content, |raw_line, terminator, record| {
      match record {
        Some(record) => {
          output.push_str(&renderer.render(&record));
          output.push_str(terminator);
          headers.push(record);
        },
        None => output.push_str(raw_line),
      }
    });

    let title = headers
      .iter()
      .find(|header| header.level == 1)
      .map(|header| header.text.clone());

    ProcessedContent {
      content: output,
      headers,
      title,
    }
  }

  /// Extract headings without rewriting the content.
  #[must_use]
  pub fn extract_headers(&self, content: &str) -> Vec<HeadingRecord> {
    let mut headers = Vec::new();
    self.scan(content, |_, _, record| {
      if let Some(record) = record {
        headers.push(record);
      }
    });
    headers
  }

  /// Walk `content` line by line, resolving a slug for every heading.
  ///
  /// The callback receives the raw line (with terminator), the terminator
  /// alone, and the heading record if the line is a heading. Slugs are unique
  /// within one scan.
  fn scan<F>(&self, content: &str, mut on_line: F)
  where
    F: FnMut(&str, &str, Option<HeadingRecord>),
  {
    let mut slugs = SlugTracker::new();
    let mut fences = FenceTracker::new();

    for raw_line in content.split_inclusive('\n') {
      let (line, terminator) = split_line_terminator(raw_line);

      if self.options.skip_code_fences {
        let was_in_code = fences.in_code_block();
        fences = fences.process_line(line);
        if was_in_code || fences.in_code_block() {
          on_line(raw_line, terminator, None);
          continue;
        }
      }

      let record = parse_heading_line(line).map(|heading| {
        let candidate = heading
          .explicit_id
          .map_or_else(|| slugify(heading.text), str::to_string);
        let slug = slugs.claim(&candidate);

        if heading.explicit_id.is_some() && slug != candidate {
          warn!(
            "Explicit heading id '{candidate}' is already in use, renumbered \
             to '{slug}'"
          );
        }
        trace!("Heading h{} '{}' -> #{slug}", heading.level, heading.text);

        HeadingRecord {
          level: heading.level,
          text: heading.text.to_string(),
          slug,
          original_text: line.to_string(),
        }
      });

      on_line(raw_line, terminator, record);
    }
  }
}

/// Collect all markdown files from the input directory
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files = Vec::with_capacity(100);

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
      files.push(path.to_owned());
    }
  }

  trace!("Found {} markdown files to process", files.len());
  files
}
