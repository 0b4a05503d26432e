//! Configuration for decoding and resampling.
//!
//! Holds the grid resolution, the rounding applied to automatic height
//! bounds, the interpolation method, and the field codes decoded when no
//! single variable is requested.

use crate::constants::{DEFAULT_CODES, DEFAULT_GRID_RESOLUTION, DEFAULT_HEIGHT_ROUNDING_CM};
use crate::error::{Result, SnowgridError};
use crate::registry::all_entries;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How per-layer values are mapped onto the height axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Value of the closest layer height; keeps categorical data such as
    /// grain type intact
    #[default]
    Nearest,
    /// Straight line between the two surrounding layers
    Linear,
}

/// Global configuration for reading and gridding .PRO files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowgridConfig {
    /// Number of points on the height axis
    pub grid_resolution: usize,

    /// Automatic height bounds are rounded outward to a multiple of this (cm)
    pub height_rounding_cm: f64,

    /// Interpolation used for every variable
    pub interpolation: InterpolationMethod,

    /// Field codes decoded when the caller names no variable
    pub default_codes: Vec<String>,
}

impl Default for SnowgridConfig {
    fn default() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            height_rounding_cm: DEFAULT_HEIGHT_ROUNDING_CM,
            interpolation: InterpolationMethod::Nearest,
            default_codes: DEFAULT_CODES.iter().map(|code| code.to_string()).collect(),
        }
    }
}

impl SnowgridConfig {
    /// Create configuration with a custom height resolution
    pub fn with_resolution(mut self, grid_resolution: usize) -> Self {
        self.grid_resolution = grid_resolution;
        self
    }

    /// Create configuration with custom height rounding
    pub fn with_height_rounding(mut self, height_rounding_cm: f64) -> Self {
        self.height_rounding_cm = height_rounding_cm;
        self
    }

    /// Select the interpolation method
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the default field code set
    pub fn with_default_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Check the configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.grid_resolution < 2 {
            return Err(SnowgridError::configuration(format!(
                "grid resolution must be at least 2, got {}",
                self.grid_resolution
            )));
        }

        if !(self.height_rounding_cm.is_finite() && self.height_rounding_cm > 0.0) {
            return Err(SnowgridError::configuration(format!(
                "height rounding must be a positive number of cm, got {}",
                self.height_rounding_cm
            )));
        }

        for code in &self.default_codes {
            if !all_entries().contains_key(code.as_str()) {
                return Err(SnowgridError::UnknownCode { code: code.clone() });
            }
        }

        debug!(
            "Configuration valid: resolution={}, rounding={}cm, interpolation={:?}",
            self.grid_resolution, self.height_rounding_cm, self.interpolation
        );
        Ok(())
    }

    /// Default codes as registry entries
    pub(crate) fn default_code_entries(&self) -> Result<Vec<&'static str>> {
        self.default_codes
            .iter()
            .map(|code| {
                all_entries()
                    .get_key_value(code.as_str())
                    .map(|(&code, _)| code)
                    .ok_or_else(|| SnowgridError::UnknownCode { code: code.clone() })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SnowgridConfig::default();
        assert_eq!(config.grid_resolution, 100);
        assert_eq!(config.height_rounding_cm, 5.0);
        assert_eq!(config.interpolation, InterpolationMethod::Nearest);
        assert_eq!(config.default_codes.len(), DEFAULT_CODES.len());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = SnowgridConfig::default()
            .with_resolution(50)
            .with_height_rounding(10.0)
            .with_interpolation(InterpolationMethod::Linear)
            .with_default_codes(["0502", "0503"]);

        assert_eq!(config.grid_resolution, 50);
        assert_eq!(config.height_rounding_cm, 10.0);
        assert_eq!(config.interpolation, InterpolationMethod::Linear);
        assert_eq!(config.default_code_entries().unwrap(), vec!["0502", "0503"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SnowgridConfig::default().with_resolution(1).validate(),
            Err(SnowgridError::InvalidConfiguration { .. })
        ));
        assert!(
            SnowgridConfig::default()
                .with_height_rounding(0.0)
                .validate()
                .is_err()
        );
        assert!(matches!(
            SnowgridConfig::default()
                .with_default_codes(["0777"])
                .validate(),
            Err(SnowgridError::UnknownCode { .. })
        ));
    }
}
