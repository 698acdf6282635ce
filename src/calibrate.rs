//! Pixel-to-centimeter calibration from the user's known height.
//!
//! Height is the only metric ground truth available, so every measurement
//! inherits the error of the proxy chosen here. Full-body frames use the
//! nose-to-ankle span; upper-body frames fall back to the torso span.

use serde::Serialize;

use crate::config::CalibrationConfig;
use crate::error::{Error, Result};
use crate::joint::{JointLabel, PoseFrame};
use crate::validate::BodyCoverage;

/// Centimeters per image pixel, along with the height it was derived from.
/// The ratio is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactor {
    cm_per_px: f64,
    height_cm: f64,
}

impl ScaleFactor {
    pub fn cm_per_px(self) -> f64 {
        self.cm_per_px
    }

    /// The real height the scale was calibrated against.
    pub fn reference_height_cm(self) -> f64 {
        self.height_cm
    }

    /// Convert a pixel length to centimeters.
    pub fn to_cm(self, px: f64) -> f64 {
        px * self.cm_per_px
    }
}

/// Vertical pixel span used as the height proxy for `coverage`.
pub fn height_proxy_px(frame: &PoseFrame, coverage: BodyCoverage) -> Result<f64> {
    let image = frame.image();
    match coverage {
        BodyCoverage::Full => {
            let nose = frame.require(JointLabel::Nose)?;
            let ankles = frame.midpoint(JointLabel::LeftAnkle, JointLabel::RightAnkle)?;
            Ok(image.pixel_height(nose, ankles))
        }
        BodyCoverage::Upper => {
            let shoulders =
                frame.midpoint(JointLabel::LeftShoulder, JointLabel::RightShoulder)?;
            let hips = frame.midpoint(JointLabel::LeftHip, JointLabel::RightHip)?;
            Ok(image.pixel_height(shoulders, hips))
        }
        BodyCoverage::Reject => Err(Error::UnmeasurableCoverage(coverage)),
    }
}

/// Compute the scale factor for a validated frame.
pub fn calibrate(
    frame: &PoseFrame,
    height_cm: f64,
    coverage: BodyCoverage,
    config: &CalibrationConfig,
) -> Result<ScaleFactor> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(Error::InvalidHeight(height_cm));
    }

    let proxy = height_proxy_px(frame, coverage)?;
    if proxy.is_nan() || proxy <= config.min_proxy_px {
        return Err(Error::DegenerateScale { proxy });
    }

    let fraction = match coverage {
        BodyCoverage::Full => config.full_body_proxy_fraction,
        _ => config.torso_proxy_fraction,
    };
    let full_height_px = proxy / fraction;
    let scale = height_cm / full_height_px;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{} proxy fraction {} gives a scale of {} cm/px",
            coverage, fraction, scale
        )));
    }

    log::debug!(
        "{} calibration: proxy {:.2} px, full height {:.2} px, {:.5} cm/px",
        coverage,
        proxy,
        full_height_px,
        scale
    );

    Ok(ScaleFactor {
        cm_per_px: scale,
        height_cm,
    })
}
