use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the docanchor crate.
#[derive(Debug, Error)]
pub enum DocanchorError {
  #[error(transparent)]
  Process(#[from] docanchor_headers::ProcessError),

  #[error(
    "{} and {} would both be written to {}",
    first.display(),
    second.display(),
    output.display()
  )]
  OutputCollision {
    output: PathBuf,
    first:  PathBuf,
    second: PathBuf,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),
}
