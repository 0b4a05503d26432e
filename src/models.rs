//! Core data structures for decoded profiles and resampled grids.
//!
//! A [`Profile`] is one snapshot of the snow/ice column backed by a polars
//! `DataFrame`, a [`ProfileSequence`] is every snapshot of a file in order,
//! and a [`Grid`] is one variable resampled onto a uniform height axis.

use crate::constants::THICKNESS_COLUMN;
use crate::error::{Result, SnowgridError};
use crate::registry::height_name;
use chrono::NaiveDateTime;
use ndarray::Array2;
use polars::prelude::*;

/// State of the column at one instant: one row per layer
#[derive(Debug, Clone)]
pub struct Profile {
    timestamp: NaiveDateTime,
    frame: DataFrame,
}

impl Profile {
    pub(crate) fn new(timestamp: NaiveDateTime, frame: DataFrame) -> Self {
        Self { timestamp, frame }
    }

    /// Snapshot time shared by every layer
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Underlying per-layer table
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn layer_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Values of a numeric column in layer order, nulls read as NaN
    pub fn values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| SnowgridError::MissingColumn {
                column: name.to_string(),
            })?;

        Ok(column
            .f64()?
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect())
    }

    /// Layer heights in cm, in source order
    pub fn heights(&self) -> Result<Vec<f64>> {
        self.values(height_name())
    }

    /// Layer thickness in metres
    pub fn thickness(&self) -> Result<Vec<f64>> {
        self.values(THICKNESS_COLUMN)
    }

    /// Height of the first layer row
    pub fn first_height(&self) -> Result<Option<f64>> {
        Ok(self.heights()?.first().copied())
    }

    /// Height of the last layer row
    pub fn last_height(&self) -> Result<Option<f64>> {
        Ok(self.heights()?.last().copied())
    }
}

/// Every snapshot of one file, in file order
#[derive(Debug, Clone, Default)]
pub struct ProfileSequence {
    profiles: Vec<Profile>,
}

impl ProfileSequence {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profile> {
        self.profiles.iter()
    }

    pub fn as_slice(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.profiles.iter().map(Profile::timestamp).collect()
    }

    /// Snapshot taken exactly at `timestamp`, if any
    pub fn snapshot_at(&self, timestamp: NaiveDateTime) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.timestamp() == timestamp)
    }

    /// First and last snapshot times
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.profiles.first(), self.profiles.last()) {
            (Some(first), Some(last)) => Some((first.timestamp(), last.timestamp())),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<Profile> {
        self.profiles
    }
}

impl From<Vec<Profile>> for ProfileSequence {
    fn from(profiles: Vec<Profile>) -> Self {
        Self::new(profiles)
    }
}

impl<'a> IntoIterator for &'a ProfileSequence {
    type Item = &'a Profile;
    type IntoIter = std::slice::Iter<'a, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}

impl IntoIterator for ProfileSequence {
    type Item = Profile;
    type IntoIter = std::vec::IntoIter<Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.into_iter()
    }
}

/// One variable resampled onto a uniform height axis, one column per profile.
///
/// Row 0 of `values` holds the highest axis point and the last row the lowest,
/// the orientation an image renderer expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub values: Array2<f64>,
    /// Ascending height axis (cm)
    pub heights: Vec<f64>,
    pub min_height: f64,
    pub max_height: f64,
    pub timestamps: Vec<NaiveDateTime>,
    pub variable: String,
}

impl Grid {
    /// Number of height points
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of retained profiles
    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Share of cells holding data, in [0, 1]
    pub fn coverage(&self) -> f64 {
        let total = self.values.len();
        if total == 0 {
            return 0.0;
        }
        let filled = self.values.iter().filter(|v| !v.is_nan()).count();
        filled as f64 / total as f64
    }

    /// Finite value range, ignoring no-data cells
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Cell-wise `self - other` for two grids on the same axes, e.g. two
    /// model runs of the same site.
    pub fn difference(&self, other: &Grid) -> Result<Grid> {
        if self.shape() != other.shape() {
            return Err(SnowgridError::GridMismatch {
                reason: format!("shape {:?} vs {:?}", self.shape(), other.shape()),
            });
        }
        if self.min_height != other.min_height || self.max_height != other.max_height {
            return Err(SnowgridError::GridMismatch {
                reason: format!(
                    "height range [{}, {}] vs [{}, {}]",
                    self.min_height, self.max_height, other.min_height, other.max_height
                ),
            });
        }
        if self.timestamps != other.timestamps {
            return Err(SnowgridError::GridMismatch {
                reason: "timestamps differ".to_string(),
            });
        }

        Ok(Grid {
            values: &self.values - &other.values,
            heights: self.heights.clone(),
            min_height: self.min_height,
            max_height: self.max_height,
            timestamps: self.timestamps.clone(),
            variable: self.variable.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::array;

    fn timestamp(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn grid(values: Array2<f64>, timestamps: Vec<NaiveDateTime>) -> Grid {
        Grid {
            values,
            heights: vec![0.0, 10.0],
            min_height: 0.0,
            max_height: 10.0,
            timestamps,
            variable: "element density (kg m-3)".to_string(),
        }
    }

    fn profile(day: u32, heights: Vec<f64>) -> Profile {
        let frame = DataFrame::new(vec![Column::new(height_name().into(), heights)]).unwrap();
        Profile::new(timestamp(day), frame)
    }

    #[test]
    fn test_profile_accessors() {
        let p = profile(1, vec![5.0, 15.0, 25.0]);
        assert_eq!(p.layer_count(), 3);
        assert_eq!(p.first_height().unwrap(), Some(5.0));
        assert_eq!(p.last_height().unwrap(), Some(25.0));
        assert!(p.has_column(height_name()));
        assert!(matches!(
            p.values("grain size (mm)"),
            Err(SnowgridError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_sequence_lookup() {
        let sequence = ProfileSequence::from(vec![profile(1, vec![1.0]), profile(2, vec![2.0])]);
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.time_span(), Some((timestamp(1), timestamp(2))));
        assert_eq!(
            sequence.snapshot_at(timestamp(2)).unwrap().heights().unwrap(),
            vec![2.0]
        );
        assert!(sequence.snapshot_at(timestamp(3)).is_none());
        assert!(ProfileSequence::default().time_span().is_none());
    }

    #[test]
    fn test_grid_coverage_and_range() {
        let g = grid(array![[1.0, f64::NAN], [3.0, -2.0]], vec![timestamp(1), timestamp(2)]);
        assert_eq!(g.shape(), (2, 2));
        assert_eq!(g.coverage(), 0.75);
        assert_eq!(g.value_range(), Some((-2.0, 3.0)));
    }

    #[test]
    fn test_grid_difference() {
        let times = vec![timestamp(1)];
        let a = grid(array![[300.0], [f64::NAN]], times.clone());
        let b = grid(array![[250.0], [100.0]], times);

        let diff = a.difference(&b).unwrap();
        assert_eq!(diff.values[[0, 0]], 50.0);
        assert!(diff.values[[1, 0]].is_nan());
    }

    #[test]
    fn test_grid_difference_rejects_mismatched_grids() {
        let a = grid(array![[1.0], [2.0]], vec![timestamp(1)]);
        let b = grid(array![[1.0, 2.0], [3.0, 4.0]], vec![timestamp(1), timestamp(2)]);
        assert!(matches!(
            a.difference(&b),
            Err(SnowgridError::GridMismatch { .. })
        ));

        let c = grid(array![[1.0], [2.0]], vec![timestamp(5)]);
        assert!(a.difference(&c).is_err());
    }
}
