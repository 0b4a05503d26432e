//! Grain type classification for display
//!
//! Grain type is stored as the Swiss F1F2F3 code, e.g. 772 for melt forms
//! with rounded grains. Only the primary class F1 is plotted, scaled to
//! [0.1, 0.9] so a nine-colour discrete scheme covers it.

use crate::constants::{GRAIN_TYPE_ANCHOR_HIGH, GRAIN_TYPE_ANCHOR_LOW};
use crate::models::Grid;
use std::fmt;

/// Primary grain shape class (the F1 digit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrainClass {
    PrecipitationParticles = 1,
    DecomposingFragments = 2,
    RoundedGrains = 3,
    FacetedCrystals = 4,
    DepthHoar = 5,
    SurfaceHoar = 6,
    MeltForms = 7,
    IceFormations = 8,
    RoundingFacets = 9,
}

impl GrainClass {
    pub const ALL: [GrainClass; 9] = [
        GrainClass::PrecipitationParticles,
        GrainClass::DecomposingFragments,
        GrainClass::RoundedGrains,
        GrainClass::FacetedCrystals,
        GrainClass::DepthHoar,
        GrainClass::SurfaceHoar,
        GrainClass::MeltForms,
        GrainClass::IceFormations,
        GrainClass::RoundingFacets,
    ];

    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.get(usize::from(digit).checked_sub(1)?).copied()
    }

    /// Class of a full F1F2F3 code
    pub fn from_code(code: f64) -> Option<Self> {
        let digit = leading_digit(code);
        if digit.is_nan() {
            return None;
        }
        Self::from_digit(digit as u8)
    }

    pub fn digit(self) -> u8 {
        self as u8
    }

    /// Scaled value this class takes in a transformed grid
    pub fn scaled(self) -> f64 {
        f64::from(self.digit()) / 10.0
    }

    pub fn label(self) -> &'static str {
        match self {
            GrainClass::PrecipitationParticles => "Precipitation particles",
            GrainClass::DecomposingFragments => "Decomposing fragmented PP",
            GrainClass::RoundedGrains => "Rounded grains",
            GrainClass::FacetedCrystals => "Faceted crystals",
            GrainClass::DepthHoar => "Depth hoar",
            GrainClass::SurfaceHoar => "Surface hoar",
            GrainClass::MeltForms => "Melt forms",
            GrainClass::IceFormations => "Ice formations",
            GrainClass::RoundingFacets => "Rounding faceted particles",
        }
    }
}

impl fmt::Display for GrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Most significant decimal digit of `value`.
///
/// NaN passes through; non-positive values have no digit and map to NaN.
pub fn leading_digit(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || value.is_infinite() {
        return f64::NAN;
    }

    // log10 can land just below an exact power of ten, so correct it
    let mut exponent = value.log10().floor() as i32;
    if 10f64.powi(exponent + 1) <= value {
        exponent += 1;
    } else if 10f64.powi(exponent) > value {
        exponent -= 1;
    }

    (value / 10f64.powi(exponent)).floor()
}

/// Map every cell to its primary class scaled by 1/10 and pin the colour
/// range with two anchor cells in the top row.
pub fn transform_grain_type_grid(grid: &Grid) -> Grid {
    let mut transformed = grid.clone();
    transformed
        .values
        .mapv_inplace(|value| leading_digit(value) / 10.0);

    if transformed.rows() > 0 {
        if transformed.columns() > 0 {
            transformed.values[[0, 0]] = GRAIN_TYPE_ANCHOR_LOW;
        }
        if transformed.columns() > 1 {
            transformed.values[[0, 1]] = GRAIN_TYPE_ANCHOR_HIGH;
        }
    }
    transformed
}
