//! Configuration for the trade pipeline.
//!
//! Describes where per-country extracts live, which countries to load, and
//! the scaling and filtering parameters used during aggregation.

use crate::constants::{
    CODE_PLACEHOLDER, COUNTRY_CODES, DEFAULT_FILE_PATTERN, DEFAULT_MATERIALITY_THRESHOLD,
    DEFAULT_TOP_PARTNERS, DEFAULT_VALUE_SCALE,
};
use crate::error::{Result, WitsError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration for WITS processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding one CSV extract per country
    pub data_dir: PathBuf,

    /// File name pattern, `{code}` is replaced by the country code
    pub file_pattern: String,

    /// Countries fanned out for each year
    pub country_codes: Vec<String>,

    /// Maximum concurrent fetches per fan-out (0 = all countries at once)
    pub max_concurrent_fetches: usize,

    /// Connections must strictly exceed this value (base currency units)
    pub materiality_threshold: f64,

    /// Partners kept per direction on each record
    pub top_partners: usize,

    /// Multiplier from source units (millions) to base currency units
    pub value_scale: f64,

    /// Show a progress bar while a year is being loaded
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            country_codes: COUNTRY_CODES.iter().map(|c| c.to_string()).collect(),
            max_concurrent_fetches: 0,
            materiality_threshold: DEFAULT_MATERIALITY_THRESHOLD,
            top_partners: DEFAULT_TOP_PARTNERS,
            value_scale: DEFAULT_VALUE_SCALE,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Set the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the per-country file name pattern
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Replace the country list
    pub fn with_country_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Limit concurrent fetches
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }

    pub fn with_materiality_threshold(mut self, threshold: f64) -> Self {
        self.materiality_threshold = threshold;
        self
    }

    pub fn with_top_partners(mut self, top_partners: usize) -> Self {
        self.top_partners = top_partners;
        self
    }

    pub fn with_value_scale(mut self, scale: f64) -> Self {
        self.value_scale = scale;
        self
    }

    /// Enable the fan-out progress bar
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Concurrency actually used for a fan-out over `countries`
    pub fn fan_out_limit(&self, countries: usize) -> usize {
        match self.max_concurrent_fetches {
            0 => countries.max(1),
            limit => limit.min(countries.max(1)),
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if !self.file_pattern.contains(CODE_PLACEHOLDER) {
            return Err(WitsError::Configuration {
                message: format!(
                    "file pattern '{}' must contain {}",
                    self.file_pattern, CODE_PLACEHOLDER
                ),
            });
        }

        if self.top_partners == 0 {
            return Err(WitsError::Configuration {
                message: "top_partners must be at least 1".to_string(),
            });
        }

        if !(self.materiality_threshold > 0.0 && self.materiality_threshold.is_finite()) {
            return Err(WitsError::Configuration {
                message: format!(
                    "materiality threshold must be positive, got {}",
                    self.materiality_threshold
                ),
            });
        }

        if !(self.value_scale > 0.0 && self.value_scale.is_finite()) {
            return Err(WitsError::Configuration {
                message: format!("value scale must be positive, got {}", self.value_scale),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.country_codes.len(), COUNTRY_CODES.len());
        assert_eq!(config.materiality_threshold, 1e8);
        assert_eq!(config.top_partners, 5);
    }

    #[test]
    fn test_fan_out_limit() {
        let config = PipelineConfig::default();
        assert_eq!(config.fan_out_limit(200), 200);
        assert_eq!(config.fan_out_limit(0), 1);

        let limited = config.with_max_concurrent_fetches(8);
        assert_eq!(limited.fan_out_limit(200), 8);
        assert_eq!(limited.fan_out_limit(3), 3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = PipelineConfig::default();

        assert!(base.clone().with_file_pattern("data.csv").validate().is_err());
        assert!(base.clone().with_top_partners(0).validate().is_err());
        assert!(base.clone().with_materiality_threshold(0.0).validate().is_err());
        assert!(base.clone().with_value_scale(f64::NAN).validate().is_err());
    }
}
