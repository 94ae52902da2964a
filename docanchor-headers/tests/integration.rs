#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use docanchor_headers::{
  HeaderOptionsBuilder,
  HeaderProcessor,
  ProcessError,
  collect_markdown_files,
  process_markdown_file,
  render_toc_html,
  render_toc_markdown,
};
use tempfile::tempdir;

const GUIDE: &str = r"# Event Store Guide

Some introduction.

## Installation

```bash
# install the CLI
cargo install es-cli
```

## Configuration {#config}

### Connection

### Connection

## Configuration
";

#[test]
fn test_full_document_processing() {
  let processor = HeaderProcessor::default();
  let result = processor.process(GUIDE);

  let slugs: Vec<&str> = result.headers.iter().map(|h| h.slug.as_str()).collect();
  assert_eq!(
    slugs,
    [
      "event-store-guide",
      "installation",
      "install-the-cli",
      "config",
      "connection",
      "connection-1",
      "configuration",
    ]
  );
  assert_eq!(result.title.as_deref(), Some("Event Store Guide"));
  assert!(result.content.contains("Some introduction.\n"));
}

#[test]
fn test_code_fences_skipped_when_enabled() {
  let processor = HeaderProcessor::new(
    HeaderOptionsBuilder::new().skip_code_fences(true).build(),
  );
  let result = processor.process(GUIDE);

  assert!(result.headers.iter().all(|h| h.slug != "install-the-cli"));
  assert!(result.content.contains("# install the CLI\n"));
  assert_eq!(result.headers.len(), 6);
}

#[test]
fn test_rendered_toc() {
  let processor = HeaderProcessor::default();
  let toc = processor.process(GUIDE).table_of_contents();

  let markdown = render_toc_markdown(&toc, 2, 3);
  assert!(markdown.starts_with("- [Installation](#installation)\n"));
  assert!(markdown.contains("\n  - [Connection](#connection-1)\n"));
  assert!(!markdown.contains("Event Store Guide"));

  let html = render_toc_html(&toc, 1, 2);
  assert!(html.starts_with("<ul><li><a href=\"#event-store-guide\">"));
  assert!(html.contains("<a href=\"#config\">Configuration</a>"));
  assert!(!html.contains("connection"));
  assert!(html.ends_with("</li></ul></li></ul>"));
}

#[test]
fn test_process_markdown_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("guide.md");
  fs::write(&path, GUIDE).expect("Failed to write guide.md in test");

  let processor = HeaderProcessor::default();
  let result =
    process_markdown_file(&processor, &path).expect("file should process");
  assert_eq!(result.headers.len(), 7);

  let missing = temp_dir.path().join("missing.md");
  let err = process_markdown_file(&processor, &missing)
    .expect_err("missing file should fail");
  assert!(matches!(err, ProcessError::Read { .. }));
  assert!(err.to_string().contains("missing.md"));
}

#[test]
fn test_collect_markdown_files() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let nested = temp_dir.path().join("a").join("b");
  fs::create_dir_all(&nested).expect("Failed to create dir in test");
  fs::write(temp_dir.path().join("index.md"), "# Index")
    .expect("Failed to write in test");
  fs::write(nested.join("deep.md"), "# Deep").expect("Failed to write in test");
  fs::write(temp_dir.path().join("notes.txt"), "# Not markdown")
    .expect("Failed to write in test");

  let files = collect_markdown_files(temp_dir.path());
  assert_eq!(files.len(), 2);
  assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "md")));
}
