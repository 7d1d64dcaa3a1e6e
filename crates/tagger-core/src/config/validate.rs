//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

fn unit_range(name: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{name} must be between 0.0 and 1.0"
        )));
    }
    Ok(())
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        unit_range("fusion.parent_threshold", self.fusion.parent_threshold)?;
        unit_range("fusion.related_boost", self.fusion.related_boost)?;
        unit_range("fusion.sibling_threshold", self.fusion.sibling_threshold)?;
        unit_range("fusion.unrelated_threshold", self.fusion.unrelated_threshold)?;
        if self.fusion.sibling_depth == 0 {
            return Err(ConfigError::ValidationError(
                "fusion.sibling_depth must be > 0".into(),
            ));
        }
        if self.palette.colors == 0 {
            return Err(ConfigError::ValidationError(
                "palette.colors must be > 0".into(),
            ));
        }
        if self.palette.max_samples == 0 {
            return Err(ConfigError::ValidationError(
                "palette.max_samples must be > 0".into(),
            ));
        }
        if self.palette.iterations == 0 {
            return Err(ConfigError::ValidationError(
                "palette.iterations must be > 0".into(),
            ));
        }
        if self.palette.epsilon < 0.0 {
            return Err(ConfigError::ValidationError(
                "palette.epsilon must be >= 0".into(),
            ));
        }
        if self.tagging.orientation_tolerance < 0.0 {
            return Err(ConfigError::ValidationError(
                "tagging.orientation_tolerance must be >= 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
