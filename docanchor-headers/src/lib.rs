//! # docanchor-headers
//!
//! Heading processor for rendered documentation pages. Scans markdown-style
//! content for ATX headings, gives every heading a deterministic, unique
//! anchor slug, rewrites each heading line into anchored markup with a
//! copy-link control, and returns the headings for building a table of
//! contents.
//!
//! ## Quick Start
//!
//! ```rust
//! use docanchor_headers::{HeaderOptions, HeaderProcessor, generate_table_of_contents};
//!
//! let processor = HeaderProcessor::new(HeaderOptions::default());
//! let result = processor.process("# Hello World\n\n## Usage {#how-to}\n");
//!
//! assert_eq!(result.headers[0].slug, "hello-world");
//! assert_eq!(result.headers[1].slug, "how-to");
//! assert_eq!(result.title.as_deref(), Some("Hello World"));
//!
//! let toc = generate_table_of_contents(&result.headers);
//! assert_eq!(toc[1].anchor, "#how-to");
//! ```
//!
//! ## Features
//!
//! - **Deterministic slugs** with `-1`, `-2`, ... suffixes on collision
//! - **Explicit ids** via a trailing `{#custom-id}` annotation
//! - **Copy-link controls** exposed through a `data-*` attribute, so the
//!   rendering layer decides how to bind the click handler
//! - **Table of contents** models plus markdown and HTML renderings
//! - **Total over input**: any string is accepted, unmatched lines pass
//!   through untouched
pub mod processor;
pub mod toc;
mod types;
pub mod utils;

pub use crate::{
  processor::{
    AnchorButtonRenderer,
    HeaderOptions,
    HeaderOptionsBuilder,
    HeaderProcessor,
    HeadingRenderer,
    ProcessError,
    collect_markdown_files,
    process,
    process_markdown_file,
    process_with_recovery,
  },
  toc::{generate_table_of_contents, render_toc_html, render_toc_markdown},
  types::{HeadingRecord, ProcessedContent, TocEntry},
  utils::{SlugTracker, slugify},
};
