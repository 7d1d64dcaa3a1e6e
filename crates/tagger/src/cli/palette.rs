//! The `tagger palette` command: dominant colors of an image.

use clap::Args;
use std::path::PathBuf;

use tagger_core::color::PaletteSummary;
use tagger_core::{Config, ImageDecoder, PaletteExtractor};

use super::{open_output, OutputFormat};

/// Arguments for the `palette` command.
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to analyze
    pub image: PathBuf,

    /// Number of colors to extract (defaults to config)
    #[arg(short = 'k', long)]
    pub colors: Option<usize>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the palette command.
pub async fn execute(args: PaletteArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(colors) = args.colors {
        anyhow::ensure!(colors > 0, "--colors must be > 0");
        config.palette.colors = colors;
    }

    let decoded = ImageDecoder::new(config.limits.clone())
        .decode(&args.image)
        .await?;

    let extractor = PaletteExtractor::new(config.palette.clone());
    let image = decoded.image;
    let palette = tokio::task::spawn_blocking(move || extractor.extract(&image)).await?;
    let summaries: Vec<PaletteSummary> = palette.iter().map(|e| e.summary()).collect();

    tracing::info!(
        "Extracted {} colors from {:?}",
        summaries.len(),
        args.image
    );

    let mut writer = open_output(
        args.output.as_deref(),
        args.format,
        args.pretty,
        &config.output,
    )?;
    writer.write_all(&summaries)?;
    writer.flush()?;
    Ok(())
}
