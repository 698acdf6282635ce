//! Body measurement extraction from a calibrated pose.
//!
//! Linear measurements are pixel distances between joints converted with the
//! scale factor. Girths cannot be observed from a single frontal view, so each
//! one is estimated from a corrected frontal width times a per-region
//! multiplier approximating an elliptical cross-section.

use std::fmt;

use serde::Serialize;

use crate::calibrate::ScaleFactor;
use crate::config::AnatomyConfig;
use crate::error::{Error, Result};
use crate::joint::{JointLabel, PoseFrame};
use crate::validate::BodyCoverage;

/// Names of the measurements a [`MeasurementSet`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    ShoulderWidth,
    ChestGirth,
    WaistGirth,
    HipGirth,
    NeckGirth,
    SleeveLength,
    Inseam,
    TorsoLength,
    HeightReference,
}

impl Measurement {
    /// All measurements, in tabular column order.
    pub const ALL: [Measurement; 9] = [
        Measurement::ShoulderWidth,
        Measurement::ChestGirth,
        Measurement::WaistGirth,
        Measurement::HipGirth,
        Measurement::NeckGirth,
        Measurement::SleeveLength,
        Measurement::Inseam,
        Measurement::TorsoLength,
        Measurement::HeightReference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Measurement::ShoulderWidth => "shoulder_width",
            Measurement::ChestGirth => "chest_girth",
            Measurement::WaistGirth => "waist_girth",
            Measurement::HipGirth => "hip_girth",
            Measurement::NeckGirth => "neck_girth",
            Measurement::SleeveLength => "sleeve_length",
            Measurement::Inseam => "inseam",
            Measurement::TorsoLength => "torso_length",
            Measurement::HeightReference => "height_reference",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body measurements in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementSet {
    /// Shoulder joint to shoulder joint
    pub shoulder_width: f64,
    pub chest_girth: f64,
    pub waist_girth: f64,
    pub hip_girth: f64,
    pub neck_girth: f64,
    /// Shoulder to elbow plus elbow to wrist, so bent arms still measure fully
    pub sleeve_length: f64,
    /// Hip to knee plus knee to ankle. Only measured for full-body frames.
    pub inseam: Option<f64>,
    /// Shoulder midpoint to hip midpoint
    pub torso_length: f64,
    /// The real height the measurements were calibrated against
    pub height_reference: f64,
}

impl MeasurementSet {
    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::ShoulderWidth => Some(self.shoulder_width),
            Measurement::ChestGirth => Some(self.chest_girth),
            Measurement::WaistGirth => Some(self.waist_girth),
            Measurement::HipGirth => Some(self.hip_girth),
            Measurement::NeckGirth => Some(self.neck_girth),
            Measurement::SleeveLength => Some(self.sleeve_length),
            Measurement::Inseam => self.inseam,
            Measurement::TorsoLength => Some(self.torso_length),
            Measurement::HeightReference => Some(self.height_reference),
        }
    }

    /// Flat (name, value) pairs in column order, skipping unmeasured values.
    pub fn entries(&self) -> Vec<(Measurement, f64)> {
        Measurement::ALL
            .iter()
            .filter_map(|&m| self.get(m).map(|v| (m, v)))
            .collect()
    }
}

/// Non-fatal advisory attached to a measurement result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Shoulders look narrow relative to the torso; the subject is probably
    /// turned away from the camera and widths are underestimated.
    Orientation { shoulder_px: f64, torso_px: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Orientation {
                shoulder_px,
                torso_px,
            } => write!(
                f,
                "shoulder width ({:.0} px) is narrow for the torso height ({:.0} px); \
                 face the camera squarely for accurate widths",
                shoulder_px, torso_px
            ),
        }
    }
}

/// Measurements plus any advisories raised while computing them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub measurements: MeasurementSet,
    pub warnings: Vec<Warning>,
}

/// Joints along one limb, from the body outward.
type Limb = [JointLabel; 3];

const LEFT_ARM: Limb = [
    JointLabel::LeftShoulder,
    JointLabel::LeftElbow,
    JointLabel::LeftWrist,
];
const RIGHT_ARM: Limb = [
    JointLabel::RightShoulder,
    JointLabel::RightElbow,
    JointLabel::RightWrist,
];
const LEFT_LEG: Limb = [JointLabel::LeftHip, JointLabel::LeftKnee, JointLabel::LeftAnkle];
const RIGHT_LEG: Limb = [
    JointLabel::RightHip,
    JointLabel::RightKnee,
    JointLabel::RightAnkle,
];

/// Compute body measurements for a validated, calibrated frame.
pub fn extract(
    frame: &PoseFrame,
    scale: ScaleFactor,
    coverage: BodyCoverage,
    config: &AnatomyConfig,
) -> Result<MeasurementReport> {
    if coverage == BodyCoverage::Reject {
        return Err(Error::UnmeasurableCoverage(coverage));
    }

    let image = frame.image();
    let left_shoulder = frame.require(JointLabel::LeftShoulder)?;
    let right_shoulder = frame.require(JointLabel::RightShoulder)?;
    let left_hip = frame.require(JointLabel::LeftHip)?;
    let right_hip = frame.require(JointLabel::RightHip)?;

    let shoulder_mid = left_shoulder.midpoint(&right_shoulder);
    let hip_mid = left_hip.midpoint(&right_hip);

    let shoulder_px = image.pixel_distance(left_shoulder, right_shoulder);
    let hip_bone_px = image.pixel_distance(left_hip, right_hip);
    let torso_px = image.pixel_distance(shoulder_mid, hip_mid);
    let torso_height_px = image.pixel_height(shoulder_mid, hip_mid);

    let mut warnings = Vec::new();
    if shoulder_px < config.min_shoulder_to_torso * torso_height_px {
        let warning = Warning::Orientation {
            shoulder_px,
            torso_px: torso_height_px,
        };
        log::warn!("{}", warning);
        warnings.push(warning);
    }

    let shoulder_width = scale.to_cm(shoulder_px);
    let hip_bone_width = scale.to_cm(hip_bone_px);

    let chest_width = shoulder_width * config.chest_width_ratio;
    let waist_width = hip_bone_width * config.waist_width_ratio;
    let hip_width = hip_bone_width * config.hip_width_ratio;
    let neck_width = shoulder_width * config.neck_width_ratio;

    let sleeve_px = limb_length_px(frame, best_limb(frame, LEFT_ARM, RIGHT_ARM))?;
    let inseam = match coverage {
        BodyCoverage::Full => {
            let leg_px = limb_length_px(frame, best_limb(frame, LEFT_LEG, RIGHT_LEG))?;
            Some(scale.to_cm(leg_px))
        }
        _ => None,
    };

    let measurements = MeasurementSet {
        shoulder_width,
        chest_girth: chest_width * config.chest_girth_multiplier,
        waist_girth: waist_width * config.waist_girth_multiplier,
        hip_girth: hip_width * config.hip_girth_multiplier,
        neck_girth: neck_width * config.neck_girth_multiplier,
        sleeve_length: scale.to_cm(sleeve_px),
        inseam,
        torso_length: scale.to_cm(torso_px),
        height_reference: scale.reference_height_cm(),
    };

    log::debug!("measurements: {:?}", measurements);

    Ok(MeasurementReport {
        measurements,
        warnings,
    })
}

/// Pick the limb whose least visible joint is more visible. Ties go left.
fn best_limb(frame: &PoseFrame, left: Limb, right: Limb) -> Limb {
    let weakest = |limb: Limb| {
        limb.iter()
            .map(|&l| frame.get(l).map_or(0.0, |j| j.visibility))
            .fold(f64::INFINITY, f64::min)
    };
    if weakest(right) > weakest(left) {
        right
    } else {
        left
    }
}

/// Sum of the two segment lengths of a limb, in pixels.
fn limb_length_px(frame: &PoseFrame, limb: Limb) -> Result<f64> {
    let image = frame.image();
    let [root, mid, end] = limb;
    let (root, mid, end) = (frame.require(root)?, frame.require(mid)?, frame.require(end)?);
    Ok(image.pixel_distance(root, mid) + image.pixel_distance(mid, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibrate::calibrate;
    use crate::config::CalibrationConfig;
    use crate::joint::{Landmark, POSE_LANDMARK_COUNT};
    use crate::types::ImageSize;

    fn standing(overrides: &[(JointLabel, f64, f64, f64)]) -> PoseFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.3, 0.9); POSE_LANDMARK_COUNT];
        let base = [
            (JointLabel::Nose, 0.5, 0.1),
            (JointLabel::LeftShoulder, 0.4, 0.2),
            (JointLabel::RightShoulder, 0.6, 0.2),
            (JointLabel::LeftElbow, 0.4, 0.35),
            (JointLabel::RightElbow, 0.6, 0.35),
            (JointLabel::LeftWrist, 0.4, 0.5),
            (JointLabel::RightWrist, 0.6, 0.5),
            (JointLabel::LeftHip, 0.45, 0.5),
            (JointLabel::RightHip, 0.55, 0.5),
            (JointLabel::LeftKnee, 0.45, 0.7),
            (JointLabel::RightKnee, 0.55, 0.7),
            (JointLabel::LeftAnkle, 0.45, 0.9),
            (JointLabel::RightAnkle, 0.55, 0.9),
        ];
        for (label, x, y) in base {
            landmarks[label.index()] = Landmark::new(x, y, 0.9);
        }
        for &(label, x, y, v) in overrides {
            landmarks[label.index()] = Landmark::new(x, y, v);
        }
        PoseFrame::from_landmarks(&landmarks, ImageSize::new(1000, 1000)).unwrap()
    }

    fn scale_for(frame: &PoseFrame, coverage: BodyCoverage, height: f64) -> ScaleFactor {
        calibrate(frame, height, coverage, &CalibrationConfig::default()).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn full_body_measurements() {
        let frame = standing(&[]);
        let scale = scale_for(&frame, BodyCoverage::Full, 172.0);
        let config = AnatomyConfig::default();
        let report = extract(&frame, scale, BodyCoverage::Full, &config).unwrap();
        let m = report.measurements;
        let s = scale.cm_per_px();

        assert!(close(m.shoulder_width, 200.0 * s));
        assert!(close(m.chest_girth, 200.0 * s * 0.92 * 2.65));
        assert!(close(m.waist_girth, 100.0 * s * 0.82 * 2.85));
        assert!(close(m.hip_girth, 100.0 * s * 1.15 * 2.9));
        assert!(close(m.neck_girth, 200.0 * s * 0.38 * 3.0));
        assert!(close(m.sleeve_length, 300.0 * s));
        assert!(close(m.inseam.unwrap(), 400.0 * s));
        assert!(close(m.torso_length, 300.0 * s));
        assert_eq!(m.height_reference, 172.0);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn sleeve_follows_bent_arm() {
        // Elbow pushed out sideways: segments are longer than the straight line.
        let frame = standing(&[
            (JointLabel::LeftElbow, 0.3, 0.35, 0.95),
            (JointLabel::LeftWrist, 0.4, 0.5, 0.95),
            (JointLabel::LeftShoulder, 0.4, 0.2, 0.95),
        ]);
        let scale = scale_for(&frame, BodyCoverage::Full, 170.0);
        let report = extract(&frame, scale, BodyCoverage::Full, &AnatomyConfig::default()).unwrap();

        let segment = (100.0f64.powi(2) + 150.0f64.powi(2)).sqrt();
        assert!(close(report.measurements.sleeve_length, 2.0 * segment * scale.cm_per_px()));
    }

    #[test]
    fn limb_with_weaker_joint_is_skipped() {
        let frame = standing(&[(JointLabel::LeftWrist, 0.4, 0.6, 0.3)]);
        let scale = scale_for(&frame, BodyCoverage::Full, 170.0);
        let report = extract(&frame, scale, BodyCoverage::Full, &AnatomyConfig::default()).unwrap();

        // Right arm is fully visible and keeps the 300 px length.
        assert!(close(report.measurements.sleeve_length, 300.0 * scale.cm_per_px()));
    }

    #[test]
    fn upper_body_has_no_inseam() {
        let frame = standing(&[
            (JointLabel::LeftAnkle, 0.45, 0.9, 0.2),
            (JointLabel::RightAnkle, 0.55, 0.9, 0.2),
        ]);
        let scale = scale_for(&frame, BodyCoverage::Upper, 170.0);
        let report =
            extract(&frame, scale, BodyCoverage::Upper, &AnatomyConfig::default()).unwrap();

        assert!(report.measurements.inseam.is_none());
        assert_eq!(report.measurements.entries().len(), Measurement::ALL.len() - 1);
    }

    #[test]
    fn narrow_shoulders_raise_orientation_warning() {
        // 100 px shoulders over a 300 px torso: 100 < 0.45 * 300
        let frame = standing(&[
            (JointLabel::LeftShoulder, 0.45, 0.2, 0.9),
            (JointLabel::RightShoulder, 0.55, 0.2, 0.9),
        ]);
        let scale = scale_for(&frame, BodyCoverage::Full, 170.0);
        let report = extract(&frame, scale, BodyCoverage::Full, &AnatomyConfig::default()).unwrap();

        assert_eq!(report.warnings.len(), 1);
        match report.warnings[0] {
            Warning::Orientation {
                shoulder_px,
                torso_px,
            } => {
                assert!(close(shoulder_px, 100.0));
                assert!(close(torso_px, 300.0));
            }
        }
        // Measurements are still produced.
        assert!(report.measurements.shoulder_width > 0.0);
    }

    #[test]
    fn reject_coverage_is_an_error() {
        let frame = standing(&[]);
        let scale = scale_for(&frame, BodyCoverage::Full, 170.0);
        let result = extract(&frame, scale, BodyCoverage::Reject, &AnatomyConfig::default());
        assert!(matches!(
            result,
            Err(Error::UnmeasurableCoverage(BodyCoverage::Reject))
        ));
    }

    #[test]
    fn entries_are_in_column_order() {
        let frame = standing(&[]);
        let scale = scale_for(&frame, BodyCoverage::Full, 170.0);
        let report = extract(&frame, scale, BodyCoverage::Full, &AnatomyConfig::default()).unwrap();

        let names: Vec<_> = report
            .measurements
            .entries()
            .iter()
            .map(|(m, _)| m.name())
            .collect();
        assert_eq!(names.first(), Some(&"shoulder_width"));
        assert_eq!(names.last(), Some(&"height_reference"));
        assert_eq!(names.len(), 9);
    }
}
