//! Command line arguments backing the `legible` binary.
use clap::{Parser, Subcommand};
use legible_rs::{AssemblyConfig, ConfigError, RecognitionMode, Seeding};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(
  name = "legible",
  about = "A CLI tool for ordering and grouping recognized text fragments",
  version
)]
pub struct Args {
  /// JSON file with assembly settings; flags override its values
  #[arg(long, short = 'c', global = true)]
  pub config: Option<PathBuf>,

  /// Log level written to stderr (off, error, warn, info, debug, trace)
  #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
  pub log_level: LevelFilter,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Print every fragment as one line of text in reading order
  Plain {
    /// Fragment dump (JSON array of fragments)
    file: PathBuf,

    /// Drop fragments at or below this confidence
    #[arg(long, short = 'm')]
    min_confidence: Option<f64>,
  },
  /// Group fragments spatially and print one line per group
  Grouped {
    /// Fragment dump (JSON array of fragments)
    file: PathBuf,

    /// Drop fragments at or below this confidence
    #[arg(long, short = 'm')]
    min_confidence: Option<f64>,

    /// Relative error improvement required to add a group
    #[arg(long, short = 't')]
    threshold: Option<f64>,

    /// Maximum number of groups
    #[arg(long, short = 'g')]
    max_groups: Option<usize>,

    /// Maximum refinement rounds per clustering attempt
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for centroid initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Seed centroids from the farthest fragments instead of at random
    #[arg(long)]
    farthest_point: bool,

    /// Print nothing instead of plain text when grouping fails
    #[arg(long)]
    no_fallback: bool,
  },
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
  value
    .parse::<LevelFilter>()
    .map_err(|_| format!("expected one of off, error, warn, info, debug, trace; got '{value}'"))
}

impl Args {
  /// The fragment dump and presentation mode, or `None` for `version`.
  pub fn target(&self) -> Option<(&Path, RecognitionMode)> {
    match &self.command {
      Commands::Version => None,
      Commands::Plain { file, .. } => Some((file.as_path(), RecognitionMode::Plain)),
      Commands::Grouped { file, .. } => Some((file.as_path(), RecognitionMode::Grouped)),
    }
  }

  /// Settings from `--config` (or defaults) with command flags applied on top.
  pub fn assembly_config(&self) -> Result<AssemblyConfig, ConfigError> {
    let mut config = match &self.config {
      Some(path) => AssemblyConfig::from_json_file(path)?,
      None => AssemblyConfig::default(),
    };

    match &self.command {
      Commands::Version => {}
      Commands::Plain { min_confidence, .. } => {
        if let Some(value) = min_confidence {
          config.min_confidence = *value;
        }
      }
      Commands::Grouped {
        min_confidence,
        threshold,
        max_groups,
        iterations,
        seed,
        farthest_point,
        no_fallback,
        ..
      } => {
        if let Some(value) = min_confidence {
          config.min_confidence = *value;
        }
        if let Some(value) = threshold {
          config.cluster_threshold = *value;
        }
        if let Some(value) = max_groups {
          config.max_groups = *value;
        }
        if let Some(value) = iterations {
          config.iterations = *value;
        }
        if seed.is_some() {
          config.seed = *seed;
        }
        if *farthest_point {
          config.seeding = Seeding::FarthestPoint;
        }
        if *no_fallback {
          config.fallback_to_plain = false;
        }
      }
    }

    config.validate()?;
    Ok(config)
  }
}
