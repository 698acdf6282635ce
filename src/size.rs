//! Chest girth to garment size band.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::SizeBands;

pub const CM_PER_INCH: f64 = 2.54;

/// Garment size bands in ascending order.
///
/// `SM` covers the 36-38 inch gap between S and M in common charts. It is a
/// label for that range rather than a size of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeBand {
    XS,
    S,
    SM,
    M,
    L,
    XL,
    XXL,
    XXXLPlus,
}

impl SizeBand {
    /// All bands, smallest first.
    pub const ALL: [SizeBand; 8] = [
        SizeBand::XS,
        SizeBand::S,
        SizeBand::SM,
        SizeBand::M,
        SizeBand::L,
        SizeBand::XL,
        SizeBand::XXL,
        SizeBand::XXXLPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SizeBand::XS => "XS",
            SizeBand::S => "S",
            SizeBand::SM => "S/M",
            SizeBand::M => "M",
            SizeBand::L => "L",
            SizeBand::XL => "XL",
            SizeBand::XXL => "XXL",
            SizeBand::XXXLPlus => "3XL+",
        }
    }
}

impl fmt::Display for SizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SizeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Classify a chest girth in centimeters with the default band boundaries.
pub fn classify_size(chest_cm: f64) -> SizeBand {
    classify_size_with(chest_cm, &SizeBands::default())
}

/// Classify a chest girth in centimeters.
///
/// Each band is half-open: a girth exactly on a boundary belongs to the larger
/// band. Inputs that fall below no boundary, NaN included, land in 3XL+.
pub fn classify_size_with(chest_cm: f64, bands: &SizeBands) -> SizeBand {
    let inches = chest_cm / CM_PER_INCH;
    bands
        .lower_bounds_in
        .iter()
        .position(|&bound| inches < bound)
        .map_or(SizeBand::XXXLPlus, |i| SizeBand::ALL[i])
}
