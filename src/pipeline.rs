//! One-call estimation: validate, calibrate, measure, classify.

use serde::Serialize;

use crate::calibrate::{calibrate, ScaleFactor};
use crate::config::Config;
use crate::error::Result;
use crate::joint::PoseFrame;
use crate::measure::{extract, MeasurementSet, Warning};
use crate::size::{classify_size_with, SizeBand};
use crate::validate::{validate, PoseAssessment};

/// Everything a UI needs to present one photo's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyEstimate {
    pub assessment: PoseAssessment,
    pub scale: ScaleFactor,
    pub measurements: MeasurementSet,
    pub size: SizeBand,
    pub warnings: Vec<Warning>,
}

/// Estimate measurements and size for a frame, gating on the configured
/// minimum confidence.
pub fn estimate(frame: &PoseFrame, height_cm: f64, config: &Config) -> Result<BodyEstimate> {
    estimate_with_min_confidence(frame, height_cm, config, config.validation.min_confidence)
}

/// Like [`estimate`], with an explicit minimum pose confidence.
///
/// `config` is validated first, whether or not it came from [`Config::load`].
pub fn estimate_with_min_confidence(
    frame: &PoseFrame,
    height_cm: f64,
    config: &Config,
    min_confidence: f64,
) -> Result<BodyEstimate> {
    config.validate()?;
    let assessment = validate(frame, &config.validation, min_confidence)?;
    let scale = calibrate(frame, height_cm, assessment.coverage, &config.calibration)?;
    let report = extract(frame, scale, assessment.coverage, &config.anatomy)?;
    let size = classify_size_with(report.measurements.chest_girth, &config.size_bands);

    log::debug!(
        "chest girth {:.1} cm -> size {}",
        report.measurements.chest_girth,
        size
    );

    Ok(BodyEstimate {
        assessment,
        scale,
        measurements: report.measurements,
        size,
        warnings: report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::joint::{JointLabel, Landmark, POSE_LANDMARK_COUNT};
    use crate::types::ImageSize;
    use crate::validate::BodyCoverage;

    fn frame(visibility: f64) -> PoseFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.3, visibility); POSE_LANDMARK_COUNT];
        for (label, x, y) in [
            (JointLabel::Nose, 0.5, 0.1),
            (JointLabel::LeftShoulder, 0.4, 0.2),
            (JointLabel::RightShoulder, 0.6, 0.2),
            (JointLabel::LeftHip, 0.45, 0.5),
            (JointLabel::RightHip, 0.55, 0.5),
            (JointLabel::LeftAnkle, 0.45, 0.9),
            (JointLabel::RightAnkle, 0.55, 0.9),
        ] {
            landmarks[label.index()] = Landmark::new(x, y, visibility);
        }
        PoseFrame::from_landmarks(&landmarks, ImageSize::new(1000, 1000)).unwrap()
    }

    #[test]
    fn estimates_full_body() {
        let estimate = estimate(&frame(0.9), 175.0, &Config::default()).unwrap();
        assert_eq!(estimate.assessment.coverage, BodyCoverage::Full);
        assert_eq!(estimate.measurements.height_reference, 175.0);
        assert!(estimate.scale.cm_per_px() > 0.0);
    }

    #[test]
    fn low_visibility_stops_before_measuring() {
        let result = estimate(&frame(0.5), 175.0, &Config::default());
        assert!(matches!(result, Err(Error::InsufficientPose { .. })));
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = Config::default();
        config.calibration.full_body_proxy_fraction = 0.0;
        let result = estimate(&frame(0.9), 170.0, &config);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn caller_minimum_is_respected() {
        let mut f = frame(0.9);
        // Hide 10 of 33 joints: confidence 23/33 = 0.697
        let mut landmarks: Vec<_> = f
            .joints()
            .iter()
            .map(|j| Landmark::new(j.position.x, j.position.y, j.visibility))
            .collect();
        for lm in landmarks.iter_mut().skip(1).take(10) {
            lm.visibility = 0.1;
        }
        f = PoseFrame::from_landmarks(&landmarks, f.image()).unwrap();

        let config = Config::default();
        assert!(estimate_with_min_confidence(&f, 170.0, &config, 0.6).is_ok());
        assert!(estimate_with_min_confidence(&f, 170.0, &config, 0.7).is_err());
    }
}
