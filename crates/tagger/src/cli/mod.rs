//! CLI command implementations.

pub mod config;
pub mod palette;
pub mod tag;

use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tagger_core::output::OutputFormat as CoreOutputFormat;
use tagger_core::OutputWriter;

/// Output format for command results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// A writer to `path`, or stdout when none is given.
///
/// CLI flags win over the `[output]` config section.
pub fn open_output(
    path: Option<&Path>,
    format: Option<OutputFormat>,
    pretty: bool,
    config: &tagger_core::config::OutputConfig,
) -> anyhow::Result<OutputWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let writer = match format {
        Some(format) => OutputWriter::new(sink, format.into(), pretty || config.pretty),
        None => {
            let mut config = config.clone();
            config.pretty |= pretty;
            OutputWriter::from_config(sink, &config)
        }
    };
    Ok(writer)
}
