//! One-dimensional interpolation of layer values onto the height axis.
//!
//! Samples are sorted by height first, so profiles may list layers top-down
//! or bottom-up. Targets outside the sampled height range, and NaN targets,
//! resample to NaN; neither method extrapolates.

use crate::config::InterpolationMethod;

/// Interpolate `(heights, values)` samples at every target height
pub fn interpolate(
    method: InterpolationMethod,
    heights: &[f64],
    values: &[f64],
    targets: &[f64],
) -> Vec<f64> {
    let samples = sorted_samples(heights, values);

    targets
        .iter()
        .map(|&target| match method {
            InterpolationMethod::Nearest => nearest_at(&samples, target),
            InterpolationMethod::Linear => linear_at(&samples, target),
        })
        .collect()
}

/// Nearest-neighbour interpolation with NaN outside the sampled range
pub fn interpolate_nearest(heights: &[f64], values: &[f64], targets: &[f64]) -> Vec<f64> {
    interpolate(InterpolationMethod::Nearest, heights, values, targets)
}

/// Linear interpolation with NaN outside the sampled range
pub fn interpolate_linear(heights: &[f64], values: &[f64], targets: &[f64]) -> Vec<f64> {
    interpolate(InterpolationMethod::Linear, heights, values, targets)
}

fn sorted_samples(heights: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    let mut samples: Vec<(f64, f64)> = heights
        .iter()
        .copied()
        .zip(values.iter().copied())
        .filter(|(h, _)| !h.is_nan())
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    samples
}

fn in_domain(samples: &[(f64, f64)], target: f64) -> bool {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => target >= first.0 && target <= last.0,
        _ => false,
    }
}

/// Value of the closest sample; a target exactly halfway between two
/// samples takes the lower one.
fn nearest_at(samples: &[(f64, f64)], target: f64) -> f64 {
    if !in_domain(samples, target) {
        return f64::NAN;
    }

    let index = samples
        .windows(2)
        .map(|pair| (pair[0].0 + pair[1].0) / 2.0)
        .take_while(|&midpoint| midpoint < target)
        .count();

    samples[index].1
}

fn linear_at(samples: &[(f64, f64)], target: f64) -> f64 {
    if !in_domain(samples, target) {
        return f64::NAN;
    }

    // First sample at or above the target
    let upper = samples.partition_point(|&(h, _)| h < target);
    if upper == 0 {
        return samples[0].1;
    }

    let (h0, v0) = samples[upper - 1];
    let (h1, v1) = samples[upper];
    if h1 == h0 {
        return v0;
    }
    v0 + (v1 - v0) * (target - h0) / (h1 - h0)
}
