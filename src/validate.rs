//! Pose quality gate: overall confidence and body coverage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::error::{Error, Result};
use crate::joint::{JointLabel, PoseFrame};

/// How much of the body is usable in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyCoverage {
    /// Hips and ankles visible: nose-to-ankle calibration is possible.
    Full,
    /// Shoulders and hips visible: torso calibration only.
    Upper,
    Reject,
}

impl fmt::Display for BodyCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyCoverage::Full => write!(f, "full"),
            BodyCoverage::Upper => write!(f, "upper"),
            BodyCoverage::Reject => write!(f, "reject"),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseAssessment {
    pub confidence: f64,
    pub coverage: BodyCoverage,
}

/// Fraction of joints whose visibility is above `threshold`.
pub fn confidence(frame: &PoseFrame, threshold: f64) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let visible = frame
        .joints()
        .iter()
        .filter(|j| j.is_visible(threshold))
        .count();
    visible as f64 / frame.len() as f64
}

/// Classify body coverage. Incomplete frames are always rejected.
pub fn classify(frame: &PoseFrame, threshold: f64) -> BodyCoverage {
    if !frame.is_complete() {
        return BodyCoverage::Reject;
    }

    let visible = |labels: &[JointLabel]| labels.iter().all(|&l| frame.is_visible(l, threshold));
    let hips = visible(&[JointLabel::LeftHip, JointLabel::RightHip]);

    if hips && visible(&[JointLabel::LeftAnkle, JointLabel::RightAnkle]) {
        BodyCoverage::Full
    } else if hips && visible(&[JointLabel::LeftShoulder, JointLabel::RightShoulder]) {
        BodyCoverage::Upper
    } else {
        BodyCoverage::Reject
    }
}

/// Gate a frame before measurement.
///
/// `min_confidence` is supplied by the caller since different entry points
/// demand different pose quality.
pub fn validate(
    frame: &PoseFrame,
    config: &ValidationConfig,
    min_confidence: f64,
) -> Result<PoseAssessment> {
    let confidence = confidence(frame, config.visibility_threshold);
    let coverage = classify(frame, config.visibility_threshold);

    log::debug!(
        "pose confidence {:.3} (minimum {:.3}), coverage {}",
        confidence,
        min_confidence,
        coverage
    );

    if confidence < min_confidence || coverage == BodyCoverage::Reject {
        return Err(Error::InsufficientPose {
            confidence,
            minimum: min_confidence,
            coverage,
        });
    }

    Ok(PoseAssessment {
        confidence,
        coverage,
    })
}
