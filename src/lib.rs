//! # body-fit
//!
//! Body measurement estimation and garment sizing from 2D pose landmarks.
//!
//! This crate provides:
//! - **Pose validation**: overall landmark confidence and body coverage
//!   (full body, upper body, or unusable)
//! - **Scale calibration**: pixels to centimeters from the subject's known height
//! - **Measurements**: shoulder width, chest/waist/hip/neck girth, sleeve length,
//!   inseam and torso length
//! - **Fit**: body ratios, garment ease scaling and size bands
//!
//! Landmark detection itself is out of scope. Frames come from any detector
//! that produces the MediaPipe 33-point pose layout with per-landmark
//! visibility.
//!
//! ## Algorithm Overview
//!
//! 1. Count joints with visibility above 0.6 and classify coverage
//! 2. Measure a vertical height proxy in pixels: nose to ankles for full-body
//!    frames (86% of standing height), shoulders to hips otherwise (30%)
//! 3. Divide the real height by the extrapolated pixel height to get cm/px
//! 4. Convert joint distances to centimeters; estimate girths from corrected
//!    frontal widths times per-region elliptical multipliers
//! 5. Map chest girth to a size band
//!
//! All anatomical constants are heuristics and live in [`Config`].
//!
//! ## Quick Start
//!
//! ```rust
//! use body_fit::{estimate, Config, ImageSize, JointLabel, Landmark, PoseFrame};
//!
//! // Landmarks from a pose detector, in schema order
//! let mut landmarks = vec![Landmark::new(0.5, 0.3, 0.9); 33];
//! for (label, x, y) in [
//!     (JointLabel::Nose, 0.5, 0.1),
//!     (JointLabel::LeftShoulder, 0.4, 0.2),
//!     (JointLabel::RightShoulder, 0.6, 0.2),
//!     (JointLabel::LeftHip, 0.45, 0.5),
//!     (JointLabel::RightHip, 0.55, 0.5),
//!     (JointLabel::LeftAnkle, 0.45, 0.9),
//!     (JointLabel::RightAnkle, 0.55, 0.9),
//! ] {
//!     landmarks[label.index()] = Landmark::new(x, y, 0.9);
//! }
//!
//! let frame = PoseFrame::from_landmarks(&landmarks, ImageSize::new(1080, 1920)).unwrap();
//! let result = estimate(&frame, 175.0, &Config::default()).unwrap();
//! println!("Chest: {:.1} cm, size {}", result.measurements.chest_girth, result.size);
//! ```
//!
//! ## Body Ratios
//!
//! ```rust
//! use body_fit::{calculate_body_ratios, fit_cloth, EaseTable, GarmentDimensions};
//! use body_fit::{Point, SizeChart, TorsoJoint, TorsoJoints};
//!
//! let joints = TorsoJoints::from([
//!     (TorsoJoint::Neck, Point::new(0.5, 0.1)),
//!     (TorsoJoint::LeftShoulder, Point::new(0.4, 0.2)),
//!     (TorsoJoint::RightShoulder, Point::new(0.6, 0.2)),
//!     (TorsoJoint::Chest, Point::new(0.5, 0.3)),
//!     (TorsoJoint::Waist, Point::new(0.5, 0.5)),
//!     (TorsoJoint::LeftHip, Point::new(0.45, 0.6)),
//!     (TorsoJoint::RightHip, Point::new(0.55, 0.6)),
//! ]);
//! let ratios = calculate_body_ratios(&joints).unwrap();
//!
//! let chart = SizeChart::from([("M".to_string(), GarmentDimensions { chest: 100.0, waist: 80.0 })]);
//! let fit = fit_cloth(&ratios, &chart, "M", "slim", &EaseTable::default()).unwrap();
//! println!("Chest scale: {:.2}", fit.chest_scale);
//! ```

mod calibrate;
mod config;
mod error;
mod fit;
mod joint;
pub mod logging;
mod measure;
mod pipeline;
mod size;
mod types;
mod validate;

pub use calibrate::{calibrate, height_proxy_px, ScaleFactor};
pub use config::{AnatomyConfig, CalibrationConfig, Config, EaseTable, SizeBands, ValidationConfig};
pub use error::{Error, Result};
pub use fit::{
    calculate_body_ratios, fit_cloth, load_size_chart, BodyRatios, FitResult, FitType,
    GarmentDimensions, SizeChart, TorsoJoint, TorsoJoints,
};
pub use joint::{Joint, JointLabel, Landmark, PoseFrame, POSE_LANDMARK_COUNT};
pub use measure::{extract, Measurement, MeasurementReport, MeasurementSet, Warning};
pub use pipeline::{estimate, estimate_with_min_confidence, BodyEstimate};
pub use size::{classify_size, classify_size_with, SizeBand, CM_PER_INCH};
pub use types::{ImageSize, Point};
pub use validate::{classify, confidence, validate, BodyCoverage, PoseAssessment};
