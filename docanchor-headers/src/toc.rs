//! Table of contents derivation and rendering.
use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::types::{HeadingRecord, TocEntry};

/// Derive one [`TocEntry`] per heading, in the same order.
///
/// No filtering, deduplication or reordering happens here.
#[must_use]
pub fn generate_table_of_contents(headers: &[HeadingRecord]) -> Vec<TocEntry> {
  headers.iter().map(TocEntry::from).collect()
}

fn in_range(entry: &TocEntry, min_level: u8, max_level: u8) -> bool {
  (min_level..=max_level).contains(&entry.level)
}

/// Backslash-escape the characters that would end or corrupt a markdown link
/// destination.
fn escape_link_destination(anchor: &str) -> String {
  let mut escaped = String::with_capacity(anchor.len());
  for c in anchor.chars() {
    if matches!(c, '(' | ')' | '<' | '>' | '\\') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

/// Render entries within `min_level..=max_level` as an indented markdown
/// bullet list of links.
#[must_use]
pub fn render_toc_markdown(
  entries: &[TocEntry],
  min_level: u8,
  max_level: u8,
) -> String {
  let mut out = String::new();
  for entry in entries.iter().filter(|e| in_range(e, min_level, max_level)) {
    let indent = "  ".repeat(usize::from(entry.level.saturating_sub(min_level)));
    let text = entry.text.replace('[', "\\[").replace(']', "\\]");
    let anchor = escape_link_destination(&entry.anchor);
    let _ = writeln!(out, "{indent}- [{text}]({anchor})");
  }
  out
}

/// Render entries within `min_level..=max_level` as nested HTML lists.
///
/// A deeper entry opens a list inside the previous item; a shallower one
/// closes lists until it finds one whose level is not deeper than itself.
/// Entries that skip levels are nested one list deeper, never more.
#[must_use]
pub fn render_toc_html(
  entries: &[TocEntry],
  min_level: u8,
  max_level: u8,
) -> String {
  let mut html = String::new();
  // Level of the items in each open `<ul>`, innermost last.
  let mut open: Vec<u8> = Vec::new();

  for entry in entries.iter().filter(|e| in_range(e, min_level, max_level)) {
    match open.last().copied() {
      None => {
        html.push_str("<ul>");
        open.push(entry.level);
      },
      Some(top) if entry.level > top => {
        html.push_str("<ul>");
        open.push(entry.level);
      },
      Some(_) => {
        html.push_str("</li>");
        while open.len() > 1 && open[open.len() - 2] >= entry.level {
          open.pop();
          html.push_str("</ul></li>");
        }
        if let Some(last) = open.last_mut() {
          *last = entry.level;
        }
      },
    }

    let _ = write!(
      html,
      "<li><a href=\"{}\">{}</a>",
      encode_double_quoted_attribute(&entry.anchor),
      encode_text(&entry.text)
    );
  }

  if !open.is_empty() {
    html.push_str("</li>");
    for _ in 1..open.len() {
      html.push_str("</ul></li>");
    }
    html.push_str("</ul>");
  }

  html
}
