//! Image loading with size limits and a decode timeout.

use image::{DynamicImage, GenericImageView};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Loads images from disk within the configured limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// A decoded image and its pixel dimensions.
#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl ImageDecoder {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode `path`.
    ///
    /// Decoding runs on the blocking pool and is abandoned after
    /// `limits.decode_timeout_ms`.
    pub async fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| PipelineError::FileNotFound(path.to_path_buf()))?;

        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot read file: {}", e),
            })?;

        let path_owned = path.to_path_buf();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);
        let decode_result = timeout(
            timeout_duration,
            tokio::task::spawn_blocking(move || decode_bytes(bytes, &path_owned)),
        )
        .await;

        let decoded = match decode_result {
            Ok(Ok(result)) => result?,
            Ok(Err(e)) => {
                return Err(PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: format!("Task join error: {}", e),
                })
            }
            Err(_) => {
                return Err(PipelineError::Timeout {
                    path: path.to_path_buf(),
                    stage: "decode".to_string(),
                    timeout_ms: self.limits.decode_timeout_ms,
                })
            }
        };

        if decoded.width > self.limits.max_image_dimension
            || decoded.height > self.limits.max_image_dimension
        {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width: decoded.width,
                height: decoded.height,
                max_dim: self.limits.max_image_dimension,
            });
        }

        tracing::debug!(
            "Decoded {:?}: {}x{}",
            path,
            decoded.width,
            decoded.height
        );
        Ok(decoded)
    }
}

/// Synchronous decode with content-based format detection.
fn decode_bytes(bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, PipelineError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;
    let image = reader.decode().map_err(|e| PipelineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        image,
        width,
        height,
    })
}
