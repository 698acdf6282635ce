//! Body proportions and garment fit scaling.
//!
//! Ratios are computed directly from planar joint positions. Units cancel, so
//! no scale calibration is needed.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::EaseTable;
use crate::error::{Error, Result};
use crate::types::Point;

/// Joints used for body ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TorsoJoint {
    Neck,
    LeftShoulder,
    RightShoulder,
    Chest,
    Waist,
    LeftHip,
    RightHip,
}

impl TorsoJoint {
    pub const ALL: [TorsoJoint; 7] = [
        TorsoJoint::Neck,
        TorsoJoint::LeftShoulder,
        TorsoJoint::RightShoulder,
        TorsoJoint::Chest,
        TorsoJoint::Waist,
        TorsoJoint::LeftHip,
        TorsoJoint::RightHip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TorsoJoint::Neck => "NECK",
            TorsoJoint::LeftShoulder => "LEFT_SHOULDER",
            TorsoJoint::RightShoulder => "RIGHT_SHOULDER",
            TorsoJoint::Chest => "CHEST",
            TorsoJoint::Waist => "WAIST",
            TorsoJoint::LeftHip => "LEFT_HIP",
            TorsoJoint::RightHip => "RIGHT_HIP",
        }
    }
}

impl fmt::Display for TorsoJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named joint positions keyed by torso joint.
pub type TorsoJoints = HashMap<TorsoJoint, Point>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyRatios {
    /// Left shoulder to right shoulder
    pub shoulder_width: f64,
    /// Neck to waist
    pub torso_length: f64,
    /// Chest-to-waist distance over torso length
    pub chest_to_waist_ratio: f64,
    /// Hip width over shoulder width
    pub hip_to_waist_ratio: f64,
}

impl BodyRatios {
    /// Flat (name, value) pairs in column order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("shoulder_width", self.shoulder_width),
            ("torso_length", self.torso_length),
            ("chest_to_waist_ratio", self.chest_to_waist_ratio),
            ("hip_to_waist_ratio", self.hip_to_waist_ratio),
        ]
    }
}

pub fn calculate_body_ratios(joints: &TorsoJoints) -> Result<BodyRatios> {
    if let Some(&missing) = TorsoJoint::ALL.iter().find(|j| !joints.contains_key(*j)) {
        return Err(Error::MissingJoint(missing));
    }
    let at = |j: TorsoJoint| joints[&j];

    let shoulder_width = at(TorsoJoint::LeftShoulder).distance(&at(TorsoJoint::RightShoulder));
    let torso_length = at(TorsoJoint::Neck).distance(&at(TorsoJoint::Waist));
    let chest_to_waist = at(TorsoJoint::Chest).distance(&at(TorsoJoint::Waist));
    let hip_width = at(TorsoJoint::LeftHip).distance(&at(TorsoJoint::RightHip));

    if torso_length == 0.0 {
        return Err(Error::DegenerateGeometry("torso_length"));
    }
    if shoulder_width == 0.0 {
        return Err(Error::DegenerateGeometry("shoulder_width"));
    }

    Ok(BodyRatios {
        shoulder_width,
        torso_length,
        chest_to_waist_ratio: chest_to_waist / torso_length,
        hip_to_waist_ratio: hip_width / shoulder_width,
    })
}

/// How loosely a garment should sit over the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitType {
    Slim,
    Regular,
    Baggy,
}

impl FitType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "slim" => Some(FitType::Slim),
            "regular" => Some(FitType::Regular),
            "baggy" => Some(FitType::Baggy),
            _ => None,
        }
    }

    /// Resolve a user-supplied fit name. Unrecognized names mean regular fit.
    pub fn resolve(name: &str) -> Self {
        FitType::from_name(name).unwrap_or_else(|| {
            log::debug!("unrecognized fit type {:?}, using regular", name);
            FitType::Regular
        })
    }

    pub fn ease(self, table: &EaseTable) -> f64 {
        match self {
            FitType::Slim => table.slim,
            FitType::Regular => table.regular,
            FitType::Baggy => table.baggy,
        }
    }
}

/// Base garment dimensions for one size, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarmentDimensions {
    pub chest: f64,
    pub waist: f64,
}

/// Size label to base garment dimensions.
pub type SizeChart = BTreeMap<String, GarmentDimensions>;

/// Load a size chart from a JSON object of `{"M": {"chest": .., "waist": ..}}`.
pub fn load_size_chart<P: AsRef<Path>>(path: P) -> Result<SizeChart> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Multiplicative scales a garment pattern must apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub chest_scale: f64,
    pub waist_scale: f64,
}

pub fn fit_cloth(
    ratios: &BodyRatios,
    chart: &SizeChart,
    selected_size: &str,
    fit_type: &str,
    ease_table: &EaseTable,
) -> Result<FitResult> {
    let base = chart
        .get(selected_size)
        .ok_or_else(|| Error::UnknownSize(selected_size.to_string()))?;
    let ease = FitType::resolve(fit_type).ease(ease_table);

    if ratios.chest_to_waist_ratio == 0.0 {
        return Err(Error::DegenerateGeometry("chest_to_waist_ratio"));
    }
    if ratios.hip_to_waist_ratio == 0.0 {
        return Err(Error::DegenerateGeometry("hip_to_waist_ratio"));
    }

    Ok(FitResult {
        chest_scale: base.chest * ease / ratios.chest_to_waist_ratio,
        waist_scale: base.waist * ease / ratios.hip_to_waist_ratio,
    })
}
