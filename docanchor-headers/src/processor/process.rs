//! Processing entry points with error recovery.
use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::error;

use super::types::HeaderProcessor;
use crate::types::{HeadingRecord, ProcessedContent};

/// Errors from the file-based convenience helpers.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  #[error("Failed to read file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Process `content` with default options.
///
/// Returns the rewritten content and the headings in source order.
///
/// # Examples
///
/// ```
/// let (html, headers) = docanchor_headers::process("# Config\n## Config\n");
/// assert_eq!(headers[0].slug, "config");
/// assert_eq!(headers[1].slug, "config-1");
/// assert!(html.starts_with("<h1 id=\"config\""));
/// ```
#[must_use]
pub fn process(content: &str) -> (String, Vec<HeadingRecord>) {
  HeaderProcessor::default().process(content).into_parts()
}

/// Process content with error recovery.
///
/// On panic the original content is returned with no headers.
#[must_use]
pub fn process_with_recovery(
  processor: &HeaderProcessor,
  content: &str,
) -> ProcessedContent {
  process_safe(
    || processor.process(content),
    || {
      ProcessedContent {
        content: content.to_string(),
        headers: Vec::new(),
        title:   None,
      }
    },
  )
}

/// Run `operation`, returning `fallback()` instead if it panics.
///
/// The panic message is logged when it is a string.
pub fn process_safe<T, F, G>(operation: F, fallback: G) -> T
where
  F: FnOnce() -> T,
  G: FnOnce() -> T,
{
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(operation)) {
    Ok(value) => value,
    Err(payload) => {
      let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
      error!("Panic during header processing: {message}");
      fallback()
    },
  }
}

/// Process a batch of files with the same processor.
///
/// # Arguments
///
/// * `processor` - The configured header processor
/// * `files` - Iterator of file paths to process
/// * `read_file_fn` - Function to read file content from path
///
/// # Returns
///
/// Vector of tuples containing (`file_path`, `processing_result`)
pub fn process_batch<I, F>(
  processor: &HeaderProcessor,
  files: I,
  read_file_fn: F,
) -> Vec<(PathBuf, Result<ProcessedContent, ProcessError>)>
where
  I: Iterator<Item = PathBuf>,
  F: Fn(&Path) -> Result<String, io::Error>,
{
  files
    .map(|path| {
      let result = read_file_fn(&path)
        .map(|content| process_with_recovery(processor, &content))
        .map_err(|source| {
          ProcessError::Read {
            path: path.clone(),
            source,
          }
        });
      (path, result)
    })
    .collect()
}

/// Read and process a markdown file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn process_markdown_file(
  processor: &HeaderProcessor,
  file_path: &Path,
) -> Result<ProcessedContent, ProcessError> {
  let content = fs::read_to_string(file_path).map_err(|source| {
    ProcessError::Read {
      path: file_path.to_path_buf(),
      source,
    }
  })?;

  Ok(process_with_recovery(processor, &content))
}
