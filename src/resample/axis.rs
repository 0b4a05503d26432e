//! Height axis construction
//!
//! Vertical extent of a profile sequence, outward rounding of that extent,
//! and the evenly spaced axis the grid rows are sampled on.

use crate::error::{Result, SnowgridError};
use crate::models::ProfileSequence;
use tracing::debug;

/// Direction used when snapping a bound to a multiple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDirection {
    Up,
    Down,
}

/// Round `num` to a multiple of `divisor` in the given direction
pub fn round_to(num: f64, divisor: f64, direction: RoundDirection) -> f64 {
    match direction {
        RoundDirection::Down => (num / divisor).floor() * divisor,
        RoundDirection::Up => (num / divisor).ceil() * divisor,
    }
}

/// Explicit height bounds (cm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightWindow {
    pub min: f64,
    pub max: f64,
}

impl HeightWindow {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(SnowgridError::configuration(format!(
                "height window needs finite min < max, got [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }
}

/// Vertical extent of the whole sequence.
///
/// Layers may be listed top-down or bottom-up, so each profile contributes
/// both its first-row and last-row height; the lowest and highest of these
/// are then rounded outward to `rounding` cm. The result may be a single
/// height when every layer sits on the same multiple.
pub fn height_extent(profiles: &ProfileSequence, rounding: f64) -> Result<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;

    for profile in profiles {
        let ends = [profile.first_height()?, profile.last_height()?];
        for height in ends.into_iter().flatten().filter(|h| !h.is_nan()) {
            range = Some(range.map_or((height, height), |(low, high)| {
                (low.min(height), high.max(height))
            }));
        }
    }

    let Some((bottom, top)) = range else {
        return Err(SnowgridError::EmptyProfileSequence);
    };

    let extent = (
        round_to(bottom, rounding, RoundDirection::Down),
        round_to(top, rounding, RoundDirection::Up),
    );
    debug!(
        "Height extent [{}, {}] rounded to [{}, {}]",
        bottom, top, extent.0, extent.1
    );
    Ok(extent)
}

/// `count` evenly spaced points from `min` to `max` inclusive
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        max
                    } else {
                        min + step * i as f64
                    }
                })
                .collect()
        }
    }
}
