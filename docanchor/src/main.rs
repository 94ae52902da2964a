use std::{
  fs,
  io::{self, Write},
  path::PathBuf,
};

use color_eyre::eyre::{Context, Result, bail};
use docanchor::{
  cli::{Cli, Commands},
  output,
};
use docanchor_config::Config;
use docanchor_headers::{HeaderProcessor, process_markdown_file};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    // Check if file already exists and that we're not forcing overwrite
    if output.exists() && !force {
      bail!(
        "Configuration file already exists: {}. Use --force to overwrite.",
        output.display()
      );
    }

    if let Some(parent) = output.parent()
      && !parent.as_os_str().is_empty()
      && !parent.exists()
    {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }

    Config::generate_default_config(format, output).wrap_err_with(|| {
      format!("Failed to generate configuration file: {}", output.display())
    })?;

    info!(
      "Configuration file created successfully at {}",
      output.display()
    );
    return Ok(());
  }

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;
  cli.command.apply_to(&mut config);
  config
    .validate()
    .wrap_err("Invalid configuration after applying command line flags")?;

  let processor = HeaderProcessor::new(config.processor_options());

  match &cli.command {
    Commands::Process { files, .. } => process(&config, &processor, files),
    Commands::Toc { file, format, .. } => {
      let result = process_markdown_file(&processor, file)?;
      let toc = output::render_toc(
        &result,
        *format,
        config.toc_min_level,
        config.toc_max_level,
      )?;

      let mut stdout = io::stdout().lock();
      writeln!(stdout, "{}", toc.trim_end())
        .wrap_err("Failed to write table of contents")?;
      Ok(())
    },
    Commands::Init { .. } => Ok(()),
  }
}

/// Anchor headings in every input and write the results.
fn process(
  config: &Config,
  processor: &HeaderProcessor,
  files: &[PathBuf],
) -> Result<()> {
  info!("Starting markdown processing...");

  let inputs = output::collect_inputs(config, files);
  if inputs.is_empty() {
    bail!(
      "No markdown files to process. Pass files or set an input directory \
       with --input-dir."
    );
  }
  output::check_output_collisions(&config.output_dir, &inputs)?;

  // Setup thread pool once for all parallel operations
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()?;

  let processed = output::process_files(processor, &inputs)?;
  let header_count: usize =
    processed.iter().map(|file| file.result.headers.len()).sum();

  output::write_outputs(&config.output_dir, &processed).wrap_err_with(|| {
    format!("Failed to write outputs to {}", config.output_dir.display())
  })?;

  info!(
    "Anchored {header_count} headings across {} files in {}",
    processed.len(),
    config.output_dir.display()
  );

  Ok(())
}
