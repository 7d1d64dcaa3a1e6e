//! Serializing reports as JSON or JSON Lines.

use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

use crate::config::OutputConfig;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON document per write; batches become an array
    #[default]
    Json,
    /// One compact JSON object per line
    JsonLines,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Ok(Self::JsonLines),
            other => Err(format!("unknown output format '{other}' (expected json or jsonl)")),
        }
    }
}

/// Writes serializable reports to any `Write` sink.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects [`OutputFormat::Json`].
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Writer using the `[output]` config section. Unknown formats fall back
    /// to JSON.
    pub fn from_config(writer: W, config: &OutputConfig) -> Self {
        let format = config.format.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}, using json", e);
            OutputFormat::Json
        });
        Self::new(writer, format, config.pretty)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write one item followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        self.serialize(item)?;
        writeln!(self.writer)
    }

    /// Write a batch: a single array for JSON, one line per item for JSONL.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write(&items),
            OutputFormat::JsonLines => items.iter().try_for_each(|item| self.write(item)),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn serialize<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        let result = if self.pretty && self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, item)
        } else {
            serde_json::to_writer(&mut self.writer, item)
        };
        result.map_err(io::Error::other)
    }
}
