use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use docanchor_config::Config;

/// Command line interface for docanchor
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "docanchor: anchored headings and tables of contents for markdown"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the docanchor CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Anchor the headings of markdown files and write their tables of
  /// contents.
  Process {
    /// Markdown files to process. Combined with every `.md` file under the
    /// input directory, if one is set.
    files: Vec<PathBuf>,

    /// Directory scanned recursively for markdown files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for processed fragments and TOC files.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Do not treat lines inside fenced code blocks as headings.
    #[arg(long = "skip-code-fences", action = clap::ArgAction::SetTrue)]
    skip_code_fences: bool,
  },

  /// Print the table of contents of a markdown file.
  Toc {
    /// Markdown file to read.
    file: PathBuf,

    /// Output format.
    #[arg(short = 'F', long, value_enum, default_value_t = TocFormat::Json)]
    format: TocFormat,

    /// Shallowest heading level to include.
    #[arg(long = "min-level", value_parser = clap::value_parser!(u8).range(1..=6))]
    min_level: Option<u8>,

    /// Deepest heading level to include.
    #[arg(long = "max-level", value_parser = clap::value_parser!(u8).range(1..=6))]
    max_level: Option<u8>,

    /// Do not treat lines inside fenced code blocks as headings.
    #[arg(long = "skip-code-fences", action = clap::ArgAction::SetTrue)]
    skip_code_fences: bool,
  },

  /// Initialize a new docanchor configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "docanchor.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

/// Output formats for the `toc` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocFormat {
  /// JSON array of entries.
  Json,
  /// Indented markdown list of links.
  Markdown,
  /// Nested HTML lists.
  Html,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

impl Commands {
  /// Apply command line flags on top of a loaded configuration. Flags only
  /// override values that were actually given.
  pub fn apply_to(&self, config: &mut Config) {
    match self {
      Self::Process {
        input_dir,
        output_dir,
        jobs,
        skip_code_fences,
        ..
      } => {
        if let Some(input_dir) = input_dir {
          config.input_dir = Some(input_dir.clone());
        }
        if let Some(output_dir) = output_dir {
          config.output_dir.clone_from(output_dir);
        }
        if jobs.is_some() {
          config.jobs = *jobs;
        }
        if *skip_code_fences {
          config.skip_code_fences = true;
        }
      },
      Self::Toc {
        min_level,
        max_level,
        skip_code_fences,
        ..
      } => {
        if let Some(min_level) = min_level {
          config.toc_min_level = *min_level;
        }
        if let Some(max_level) = max_level {
          config.toc_max_level = *max_level;
        }
        if *skip_code_fences {
          config.skip_code_fences = true;
        }
      },
      Self::Init { .. } => {},
    }
  }
}
