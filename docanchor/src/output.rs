//! Batch processing of markdown files and writing of the results.
use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use docanchor_config::Config;
use docanchor_headers::{
  HeaderProcessor,
  ProcessedContent,
  TocEntry,
  collect_markdown_files,
  process_markdown_file,
  render_toc_html,
  render_toc_markdown,
};
use log::{debug, info};
use rayon::prelude::*;

use crate::{cli::TocFormat, error::DocanchorError};

/// A markdown file queued for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
  pub source_path:   PathBuf,
  /// Path used to place outputs under the output directory.
  pub relative_path: PathBuf,
}

/// Output entry for a processed markdown file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
  pub input:  InputFile,
  pub result: ProcessedContent,
}

/// Gather explicit files and every markdown file under the configured input
/// directory.
///
/// Explicit files are placed at the top of the output directory; files found
/// in the input directory keep their relative location.
#[must_use]
pub fn collect_inputs(config: &Config, files: &[PathBuf]) -> Vec<InputFile> {
  let mut inputs: Vec<InputFile> = files
    .iter()
    .map(|path| {
      InputFile {
        source_path:   path.clone(),
        relative_path: path
          .file_name()
          .map_or_else(|| path.clone(), PathBuf::from),
      }
    })
    .collect();

  if let Some(ref input_dir) = config.input_dir {
    info!("Input directory: {}", input_dir.display());
    let found = collect_markdown_files(input_dir);
    info!("Found {} markdown files", found.len());

    inputs.extend(found.into_iter().map(|path| {
      let relative_path = path
        .strip_prefix(input_dir)
        .map_or_else(|_| path.clone(), Path::to_path_buf);
      InputFile {
        source_path: path,
        relative_path,
      }
    }));
  }

  inputs
}

/// Process all inputs in parallel on the current rayon pool.
///
/// # Errors
///
/// Returns the first error encountered while reading an input file.
pub fn process_files(
  processor: &HeaderProcessor,
  inputs: &[InputFile],
) -> Result<Vec<ProcessedFile>, DocanchorError> {
  inputs
    .par_iter()
    .map(|input| {
      let result = process_markdown_file(processor, &input.source_path)?;
      debug!(
        "Processed {}: {} headings",
        input.source_path.display(),
        result.headers.len()
      );
      Ok(ProcessedFile {
        input: input.clone(),
        result,
      })
    })
    .collect()
}

/// Paths of the processed fragment and the TOC file for an input.
#[must_use]
pub fn output_paths(output_dir: &Path, input: &InputFile) -> (PathBuf, PathBuf) {
  let base = output_dir.join(&input.relative_path);
  (base.with_extension("html"), base.with_extension("toc.json"))
}

fn write_file(path: &Path, contents: &str) -> Result<(), DocanchorError> {
  let to_error = |source| {
    DocanchorError::Write {
      path: path.to_path_buf(),
      source,
    }
  };

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(to_error)?;
  }
  fs::write(path, contents).map_err(to_error)
}

/// Fail if two inputs map onto the same output file.
///
/// # Errors
///
/// Returns [`DocanchorError::OutputCollision`] naming both sources.
pub fn check_output_collisions(
  output_dir: &Path,
  inputs: &[InputFile],
) -> Result<(), DocanchorError> {
  let mut claimed: HashMap<PathBuf, &Path> = HashMap::with_capacity(inputs.len());

  for input in inputs {
    let (html_path, _) = output_paths(output_dir, input);
    if let Some(first) = claimed.insert(html_path.clone(), &input.source_path)
    {
      return Err(DocanchorError::OutputCollision {
        output: html_path,
        first:  first.to_path_buf(),
        second: input.source_path.clone(),
      });
    }
  }

  Ok(())
}

/// Write the processed fragment and the TOC JSON for every file.
///
/// Nothing is written if two files would share an output path.
///
/// # Errors
///
/// Returns an error on an output collision, or if a directory or file cannot
/// be written.
pub fn write_outputs(
  output_dir: &Path,
  files: &[ProcessedFile],
) -> Result<(), DocanchorError> {
  let inputs: Vec<InputFile> =
    files.iter().map(|file| file.input.clone()).collect();
  check_output_collisions(output_dir, &inputs)?;

  for file in files {
    let (html_path, toc_path) = output_paths(output_dir, &file.input);

    write_file(&html_path, &file.result.content)?;

    let toc = serde_json::to_string_pretty(&file.result.table_of_contents())?;
    write_file(&toc_path, &toc)?;

    debug!("Wrote {} and {}", html_path.display(), toc_path.display());
  }

  info!(
    "Wrote {} processed files to {}",
    files.len(),
    output_dir.display()
  );
  Ok(())
}

/// Render the table of contents of `result` restricted to
/// `min_level..=max_level`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_toc(
  result: &ProcessedContent,
  format: TocFormat,
  min_level: u8,
  max_level: u8,
) -> Result<String, DocanchorError> {
  let entries = result.table_of_contents();

  Ok(match format {
    TocFormat::Json => {
      let filtered: Vec<&TocEntry> = entries
        .iter()
        .filter(|entry| (min_level..=max_level).contains(&entry.level))
        .collect();
      serde_json::to_string_pretty(&filtered)?
    },
    TocFormat::Markdown => render_toc_markdown(&entries, min_level, max_level),
    TocFormat::Html => render_toc_html(&entries, min_level, max_level),
  })
}
