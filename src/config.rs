//! Tunable constants for validation, calibration and measurement.
//!
//! Every anatomical multiplier here is a heuristic calibration knob, not a
//! physical law. Defaults reproduce the reference rule set; a JSON file may
//! override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
    pub calibration: CalibrationConfig,
    pub anatomy: AnatomyConfig,
    pub ease: EaseTable,
    pub size_bands: SizeBands,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// A joint counts as visible when its visibility is strictly above this.
    pub visibility_threshold: f64,
    /// Minimum fraction of visible joints for a frame to be measured.
    pub min_confidence: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.6,
            min_confidence: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fraction of standing height spanned by nose-to-ankle.
    pub full_body_proxy_fraction: f64,
    /// Fraction of standing height spanned by shoulder-to-hip.
    pub torso_proxy_fraction: f64,
    /// Height proxies at or below this many pixels cannot be calibrated.
    pub min_proxy_px: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            full_body_proxy_fraction: 0.86,
            torso_proxy_fraction: 0.30,
            min_proxy_px: 1e-6,
        }
    }
}

/// Width corrections and circumference multipliers per body region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnatomyConfig {
    /// Chest width at underarm level as a fraction of shoulder width.
    pub chest_width_ratio: f64,
    /// Widest hip point relative to hip-bone width.
    pub hip_width_ratio: f64,
    /// Natural waist width relative to hip-bone width.
    pub waist_width_ratio: f64,
    /// Neck width as a fraction of shoulder width.
    pub neck_width_ratio: f64,
    pub chest_girth_multiplier: f64,
    pub waist_girth_multiplier: f64,
    pub hip_girth_multiplier: f64,
    pub neck_girth_multiplier: f64,
    /// Shoulder width below this fraction of torso height suggests the
    /// subject is turned away from the camera.
    pub min_shoulder_to_torso: f64,
}

impl Default for AnatomyConfig {
    fn default() -> Self {
        Self {
            chest_width_ratio: 0.92,
            hip_width_ratio: 1.15,
            waist_width_ratio: 0.82,
            neck_width_ratio: 0.38,
            chest_girth_multiplier: 2.65,
            waist_girth_multiplier: 2.85,
            hip_girth_multiplier: 2.9,
            neck_girth_multiplier: 3.0,
            min_shoulder_to_torso: 0.45,
        }
    }
}

/// Garment ease multipliers per fit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaseTable {
    pub slim: f64,
    pub regular: f64,
    pub baggy: f64,
}

impl Default for EaseTable {
    fn default() -> Self {
        Self {
            slim: 1.02,
            regular: 1.08,
            baggy: 1.18,
        }
    }
}

/// Lower bounds, in inches of chest girth, of the bands S through 3XL+.
/// Anything below the first bound is XS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBands {
    pub lower_bounds_in: [f64; 7],
}

impl Default for SizeBands {
    fn default() -> Self {
        Self {
            lower_bounds_in: [34.0, 36.0, 38.0, 40.0, 42.0, 44.0, 46.0],
        }
    }
}

impl Config {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject constants that would make downstream arithmetic meaningless.
    pub fn validate(&self) -> Result<()> {
        let v = &self.validation;
        unit_interval("validation.visibility_threshold", v.visibility_threshold)?;
        unit_interval("validation.min_confidence", v.min_confidence)?;

        let c = &self.calibration;
        unit_fraction("calibration.full_body_proxy_fraction", c.full_body_proxy_fraction)?;
        unit_fraction("calibration.torso_proxy_fraction", c.torso_proxy_fraction)?;
        if !c.min_proxy_px.is_finite() || c.min_proxy_px < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "calibration.min_proxy_px must be a non-negative number, got {}",
                c.min_proxy_px
            )));
        }

        let a = &self.anatomy;
        for (name, value) in [
            ("anatomy.chest_width_ratio", a.chest_width_ratio),
            ("anatomy.hip_width_ratio", a.hip_width_ratio),
            ("anatomy.waist_width_ratio", a.waist_width_ratio),
            ("anatomy.neck_width_ratio", a.neck_width_ratio),
            ("anatomy.chest_girth_multiplier", a.chest_girth_multiplier),
            ("anatomy.waist_girth_multiplier", a.waist_girth_multiplier),
            ("anatomy.hip_girth_multiplier", a.hip_girth_multiplier),
            ("anatomy.neck_girth_multiplier", a.neck_girth_multiplier),
            ("anatomy.min_shoulder_to_torso", a.min_shoulder_to_torso),
            ("ease.slim", self.ease.slim),
            ("ease.regular", self.ease.regular),
            ("ease.baggy", self.ease.baggy),
        ] {
            positive(name, value)?;
        }

        let bounds = &self.size_bands.lower_bounds_in;
        if bounds.iter().any(|b| !b.is_finite()) || bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(format!(
                "size_bands.lower_bounds_in must be finite and strictly increasing, got {:?}",
                bounds
            )));
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}

fn unit_fraction(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must lie in (0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{"calibration": {"torso_proxy_fraction": 0.33}, "ease": {"baggy": 1.25}}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.calibration.torso_proxy_fraction, 0.33);
        assert_eq!(config.calibration.full_body_proxy_fraction, 0.86);
        assert_eq!(config.ease.baggy, 1.25);
        assert_eq!(config.ease.regular, 1.08);
        assert_eq!(config.anatomy, AnatomyConfig::default());
    }

    #[test]
    fn rejects_unsorted_size_bands() {
        let mut config = Config::default();
        config.size_bands.lower_bounds_in[3] = 30.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_proxy_fraction() {
        let mut config = Config::default();
        config.calibration.torso_proxy_fraction = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_negative_multiplier() {
        let mut config = Config::default();
        config.anatomy.hip_girth_multiplier = -2.9;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn save_and_load_config() {
        let mut config = Config::default();
        config.validation.min_confidence = 0.7;

        let temp_path = std::env::temp_dir().join("body_fit_test_config.json");
        config.save(&temp_path).unwrap();

        let loaded = Config::load(&temp_path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(temp_path).ok();
    }
}
