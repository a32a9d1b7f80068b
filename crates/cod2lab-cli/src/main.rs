use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cod2lab_core::{ConvertConfig, loader, run};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert a Captain of Industry data dump into a FactorioLab data set"
)]
struct Cli {
    /// Directory holding products and machines_and_buildings (.json, .ron or .toml)
    #[arg(long, default_value = "in/data")]
    input_dir: PathBuf,

    /// Where to write the data set
    #[arg(short, long, default_value = "out/data.json")]
    output: PathBuf,

    /// Conversion settings file (RON, TOML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write icon placements for a sprite sheet composer
    #[arg(long)]
    sprite_manifest: Option<PathBuf>,

    /// Log per-entity details (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => ConvertConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConvertConfig::default(),
    };

    let conversion = run(&cli.input_dir, &cli.output, &config)
        .with_context(|| format!("converting {}", cli.input_dir.display()))?;

    if let Some(path) = &cli.sprite_manifest {
        loader::write_json(path, &conversion.icons)
            .with_context(|| format!("writing sprite manifest {}", path.display()))?;
        info!(path = %path.display(), icons = conversion.icons.len(), "sprite manifest written");
    }

    println!(
        "Wrote {} items and {} recipes to {} ({})",
        conversion.data.items.len(),
        conversion.data.recipes.len(),
        cli.output.display(),
        conversion.report
    );
    Ok(())
}
