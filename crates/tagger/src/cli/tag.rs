//! The `tagger tag` command: fuse two models' predictions for one image.

use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

use tagger_core::taxonomy::load_dataset;
use tagger_core::{
    merge_overlapping_pairs, pair_predictions, BoundingBox, BoxPrediction, BoxType, Config,
    Dataset, ImageDecoder, NetPrediction, Prediction, Tagger,
};

use super::{open_output, OutputFormat};

/// Arguments for the `tag` command.
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Image to tag
    pub image: PathBuf,

    /// JSON file with the raw outputs of the two models
    #[arg(short, long)]
    pub predictions: PathBuf,

    /// Directory of taxonomy files (overrides config)
    #[arg(long, env = "TAGGER_TAXONOMY_DIR")]
    pub taxonomy_dir: Option<PathBuf>,

    /// Merge pairs whose detections overlap on both sides
    #[arg(long)]
    pub merge_boxes: bool,

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

/// The predictions file: one entry per model.
#[derive(Debug, Deserialize)]
pub struct PredictionsFile {
    pub a: ModelOutput,
    pub b: ModelOutput,
}

/// Raw output of one model.
#[derive(Debug, Deserialize)]
pub struct ModelOutput {
    /// Name of the taxonomy the class indices refer to
    pub dataset: String,

    /// Box convention of any `bbox` entries, e.g. `xyxy` or `xywh-tl`
    #[serde(default)]
    pub box_type: Option<String>,

    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
pub struct RawPrediction {
    pub class: usize,
    pub confidence: f32,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

/// Execute the tag command.
pub async fn execute(args: TagArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = &args.taxonomy_dir {
        config.taxonomy.dir = dir.to_string_lossy().into_owned();
    }

    let content = tokio::fs::read_to_string(&args.predictions)
        .await
        .with_context(|| format!("Failed to read predictions {:?}", args.predictions))?;
    let file: PredictionsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse predictions {:?}", args.predictions))?;

    let decoder = ImageDecoder::new(config.limits.clone());
    let (decoded, dataset_a, dataset_b) = tokio::try_join!(
        async { decoder.decode(&args.image).await.map_err(anyhow::Error::from) },
        load(config.taxonomy_path(&file.a.dataset)),
        load(config.taxonomy_path(&file.b.dataset)),
    )?;

    let side_a = resolve_side(&file.a, &dataset_a)?;
    let side_b = resolve_side(&file.b, &dataset_b)?;
    let mut pairs = align(side_a, side_b);
    if args.merge_boxes {
        pairs = merge_overlapping_pairs(pairs);
    }

    let tagger = Tagger::new(config)?;
    let report = tagger.tag(&decoded.image, &pairs);

    let mut writer = open_output(
        args.output.as_deref(),
        args.format,
        args.pretty,
        &tagger.config().output,
    )?;
    writer.write(&report)?;
    writer.flush()?;
    Ok(())
}

async fn load(path: PathBuf) -> anyhow::Result<Dataset> {
    let dataset = tokio::task::spawn_blocking(move || load_dataset(&path)).await??;
    Ok(dataset)
}

/// Resolve one model's raw output against its dataset, in file order.
///
/// Unknown class indices keep their slot as `None` so the other model's
/// predictions stay aligned.
pub fn resolve_side(
    output: &ModelOutput,
    dataset: &Dataset,
) -> anyhow::Result<Vec<Option<Prediction>>> {
    let box_type = match &output.box_type {
        Some(name) => BoxType::from_str(name).map_err(anyhow::Error::msg)?,
        None => BoxType::default(),
    };

    let mut resolved = Vec::with_capacity(output.predictions.len());
    for raw in &output.predictions {
        let bbox = match &raw.bbox {
            Some(points) => Some(BoundingBox::from_slice(points, box_type)?),
            None => None,
        };
        let prediction = NetPrediction::resolve(dataset, raw.class, raw.confidence).map(|net| {
            match bbox {
                Some(bbox) => Prediction::Box(BoxPrediction::new(net.label, net.confidence, bbox)),
                None => Prediction::Net(net),
            }
        });
        resolved.push(prediction);
    }
    Ok(resolved)
}

/// Pair both sides by position, dropping pairs where either side is unresolved.
pub fn align(
    a: Vec<Option<Prediction>>,
    b: Vec<Option<Prediction>>,
) -> Vec<(Prediction, Prediction)> {
    let paired = pair_predictions(a, b);
    let total = paired.len();
    let pairs: Vec<(Prediction, Prediction)> = paired
        .into_iter()
        .filter_map(|(a, b)| Some((a?, b?)))
        .collect();
    if pairs.len() < total {
        tracing::warn!(
            "Dropped {} of {} prediction pairs with unresolved classes",
            total - pairs.len(),
            total
        );
    }
    pairs
}
