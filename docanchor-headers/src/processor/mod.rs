//! Header processing module.
//!
//! # Architecture
//!
//! - [`core`]: heading detection, slug assignment and markup injection
//! - [`process`]: high-level entry points with error recovery
//! - [`types`]: options, the processor struct and the rendering seam
pub mod core;
pub mod process;
pub mod types;

pub use self::core::{
  HeadingLine,
  collect_markdown_files,
  parse_heading_line,
};

pub use process::{
  ProcessError,
  process,
  process_batch,
  process_markdown_file,
  process_safe,
  process_with_recovery,
};
pub use types::{
  AnchorButtonRenderer,
  HeaderOptions,
  HeaderOptionsBuilder,
  HeaderProcessor,
  HeadingRenderer,
};
