use thiserror::Error;

use crate::fit::TorsoJoint;
use crate::joint::JointLabel;
use crate::validate::BodyCoverage;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Insufficient pose: confidence {confidence:.2} (minimum {minimum:.2}), coverage {coverage}"
    )]
    InsufficientPose {
        confidence: f64,
        minimum: f64,
        coverage: BodyCoverage,
    },

    #[error("Cannot measure a pose with {0} coverage")]
    UnmeasurableCoverage(BodyCoverage),

    #[error("Missing landmark: {0:?}")]
    MissingLandmark(JointLabel),

    #[error("Degenerate scale: height proxy of {proxy} px is too small to calibrate")]
    DegenerateScale { proxy: f64 },

    #[error("Missing joint: {0}")]
    MissingJoint(TorsoJoint),

    #[error("Unknown size: {0:?} is not in the size chart")]
    UnknownSize(String),

    #[error("Degenerate geometry: {0} has zero length")]
    DegenerateGeometry(&'static str),

    #[error("Invalid height: {0} cm")]
    InvalidHeight(f64),

    #[error("Invalid pose frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
