//! Command line generator for offline cache manifests.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cache_manifest::{ManifestBuilder, ManifestConfig};

/// Generate an offline cache manifest from a declarative configuration file.
#[derive(Debug, Parser)]
#[command(name = "cache-manifest", version, about)]
struct Cli {
  /// Root directory that patterns and relative entries resolve against.
  #[arg(short, long, default_value = ".")]
  root: PathBuf,

  /// Configuration file; defaults to manifest.config.json under the root.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Write the manifest here instead of printing it to stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,
}

fn main() -> Result<()> {
  init_logging();

  let cli = Cli::parse();
  let root = cli.root.canonicalize().with_context(|| {
    format!("root directory {} is not accessible", cli.root.display())
  })?;

  let config = match &cli.config {
    Some(path) => ManifestConfig::load_from_path(path)?,
    None => ManifestConfig::discover(&root)?,
  };

  let manifest = config.apply(ManifestBuilder::new(root)).build();
  let document = manifest.render();

  match &cli.output {
    Some(path) => fs::write(path, &document)
      .with_context(|| format!("failed to write {}", path.display()))?,
    None => println!("{document}"),
  }

  Ok(())
}

/// Route diagnostics to stderr, filtered by RUST_LOG and defaulting to warn
/// so missing-file notices surface without drowning the manifest output.
fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}
