//! Tests for grid creation

use super::super::axis::HeightWindow;
use super::super::grid::{GridResampler, TimeWindow, create_grid};
use super::{density_sequence, minimal_sequence, test_sequence};
use crate::config::{InterpolationMethod, SnowgridConfig};
use crate::constants::{GRAIN_TYPE_ANCHOR_HIGH, GRAIN_TYPE_ANCHOR_LOW};
use crate::error::SnowgridError;
use crate::models::ProfileSequence;
use crate::pro_parser::tests::datetime;
use proptest::prelude::*;

fn resampler(resolution: usize) -> GridResampler {
    GridResampler::new(SnowgridConfig::default().with_resolution(resolution))
}

#[test]
fn test_default_grid_shape_and_extent() {
    let profiles = test_sequence("density");
    let grid = GridResampler::default()
        .create_grid(&profiles, "density", None, None)
        .unwrap();

    assert_eq!(grid.shape(), (100, 3));
    assert_eq!(grid.min_height, 410.0);
    assert_eq!(grid.max_height, 455.0);
    assert_eq!(grid.heights.first(), Some(&410.0));
    assert_eq!(grid.heights.last(), Some(&455.0));
    assert_eq!(grid.timestamps, vec![datetime(27), datetime(28), datetime(29)]);
    assert_eq!(grid.variable, "element density (kg m-3)");
}

#[test]
fn test_columns_are_written_top_down() {
    let profiles = test_sequence("density");
    let grid = GridResampler::default()
        .create_grid(&profiles, "density", None, None)
        .unwrap();
    let bottom = grid.rows() - 1;

    // Row 0 is the top of the axis (455 cm)
    assert!(grid.values[[0, 0]].is_nan());
    assert_eq!(grid.values[[0, 1]], 90.0);
    assert_eq!(grid.values[[bottom, 0]], 300.0);
    assert_eq!(grid.values[[bottom, 1]], 310.0);
    // Third snapshot starts at 420 cm
    assert!(grid.values[[bottom, 2]].is_nan());
}

#[test]
fn test_explicit_height_window_used_verbatim() {
    let profiles = test_sequence("density");
    let window = HeightWindow::new(412.0, 448.0).unwrap();
    let grid = resampler(2)
        .create_grid(&profiles, "density", None, Some(window))
        .unwrap();

    assert_eq!(grid.min_height, 412.0);
    assert_eq!(grid.max_height, 448.0);
    assert_eq!(grid.heights, vec![412.0, 448.0]);
    assert_eq!(grid.values[[0, 0]], 120.0);
    assert_eq!(grid.values[[1, 0]], 300.0);
}

#[test]
fn test_time_window_is_strict() {
    let profiles = test_sequence("density");
    let resampler = GridResampler::default();

    let middle = TimeWindow::new(datetime(27), datetime(29));
    let grid = resampler
        .create_grid(&profiles, "density", Some(middle), None)
        .unwrap();
    assert_eq!(grid.timestamps, vec![datetime(28)]);
    assert_eq!(grid.shape(), (100, 1));

    let exact = TimeWindow::new(datetime(28), datetime(28));
    let grid = resampler
        .create_grid(&profiles, "density", Some(exact), None)
        .unwrap();
    assert_eq!(grid.columns(), 0);
    assert_eq!(grid.rows(), 100);
}

#[test]
fn test_extent_ignores_time_window() {
    let profiles = test_sequence("density");
    let window = TimeWindow::new(datetime(28), datetime(30));
    let grid = GridResampler::default()
        .create_grid(&profiles, "density", Some(window), None)
        .unwrap();

    // Only the 29th is kept, but its 420..440 cm span does not set the axis
    assert_eq!(grid.columns(), 1);
    assert_eq!((grid.min_height, grid.max_height), (410.0, 455.0));
}

#[test]
fn test_top_down_profile_extent() {
    let profiles = density_sequence(
        "0500,1,27.01.2020 00:00:00\n0501,4,60,50,40,30\n0502,4,1,2,3,4",
    );
    let grid = GridResampler::default()
        .create_grid(&profiles, "density", None, None)
        .unwrap();
    let bottom = grid.rows() - 1;

    assert_eq!(grid.shape(), (100, 1));
    assert_eq!((grid.min_height, grid.max_height), (30.0, 50.0));
    assert_eq!(grid.heights.first(), Some(&30.0));
    assert!(grid.heights.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(grid.values[[0, 0]], 2.0);
    assert_eq!(grid.values[[bottom, 0]], 4.0);
}

#[test]
fn test_single_height_extent() {
    let profiles = density_sequence(
        "0500,1,27.01.2020 00:00:00\n0501,2,0,10\n0502,2,100,200\n\
         0500,1,28.01.2020 00:00:00\n0501,2,0,10\n0502,2,100,250",
    );
    let grid = GridResampler::default()
        .create_grid(&profiles, "density", None, None)
        .unwrap();

    assert_eq!(grid.shape(), (100, 2));
    assert_eq!((grid.min_height, grid.max_height), (10.0, 10.0));
    assert!(grid.heights.iter().all(|h| *h == 10.0));
    assert!(grid.values.column(0).iter().all(|v| *v == 200.0));
    assert!(grid.values.column(1).iter().all(|v| *v == 250.0));
}

#[test]
fn test_minimal_end_to_end() {
    let profiles = minimal_sequence();
    let window = HeightWindow::new(10.0, 20.0).unwrap();
    let config = SnowgridConfig::default().with_resolution(2);

    let grid = create_grid(&profiles, "density", None, Some(window), &config).unwrap();
    assert_eq!(grid.shape(), (2, 1));
    assert_eq!(grid.values[[0, 0]], 300.0);
    assert_eq!(grid.values[[1, 0]], 200.0);

    let again = create_grid(&profiles, "density", None, Some(window), &config).unwrap();
    assert_eq!(grid, again);
}

#[test]
fn test_linear_interpolation() {
    let profiles = minimal_sequence();
    let window = HeightWindow::new(10.0, 20.0).unwrap();
    let config = SnowgridConfig::default()
        .with_resolution(3)
        .with_interpolation(InterpolationMethod::Linear);

    let grid = create_grid(&profiles, "density", None, Some(window), &config).unwrap();
    assert_eq!(grid.values.column(0).to_vec(), vec![300.0, 250.0, 200.0]);
}

#[test]
fn test_thickness_grid() {
    let profiles = test_sequence("thickness");
    let grid = GridResampler::default()
        .create_grid(&profiles, "thickness", None, None)
        .unwrap();

    assert_eq!(grid.variable, "thickness_m");
    let (low, high) = grid.value_range().unwrap();
    assert!(low > 0.0 && high <= 0.25 + 1e-9);
}

#[test]
fn test_grain_type_display_grid() {
    let profiles = test_sequence("grain type");
    let grid = GridResampler::default()
        .create_display_grid(&profiles, "grain type", None, None)
        .unwrap();
    let bottom = grid.rows() - 1;

    assert_eq!(grid.values[[0, 0]], GRAIN_TYPE_ANCHOR_LOW);
    assert_eq!(grid.values[[0, 1]], GRAIN_TYPE_ANCHOR_HIGH);
    assert!((grid.values[[bottom, 0]] - 0.7).abs() < 1e-12);

    for value in grid.values.iter().skip(2) {
        assert!(value.is_nan() || (0.1..=0.9).contains(value));
    }
}

#[test]
fn test_display_grid_leaves_other_variables() {
    let profiles = test_sequence("density");
    let resampler = GridResampler::default();
    let raw = resampler.create_grid(&profiles, "density", None, None).unwrap();
    let display = resampler
        .create_display_grid(&profiles, "density", None, None)
        .unwrap();
    // Cell-wise, since NaN never compares equal
    assert_eq!(raw.shape(), display.shape());
    assert!(
        raw.values
            .iter()
            .zip(display.values.iter())
            .all(|(a, b)| (a.is_nan() && b.is_nan()) || a == b)
    );
}

#[test]
fn test_empty_sequence() {
    let result = GridResampler::default().create_grid(
        &ProfileSequence::default(),
        "density",
        None,
        None,
    );
    assert!(matches!(result, Err(SnowgridError::EmptyProfileSequence)));
}

#[test]
fn test_variable_not_parsed() {
    let profiles = test_sequence("density");
    let result = GridResampler::default().create_grid(&profiles, "temperature", None, None);
    assert!(matches!(result, Err(SnowgridError::MissingColumn { .. })));
}

#[test]
fn test_invalid_configuration() {
    let profiles = test_sequence("density");

    assert!(matches!(
        resampler(1).create_grid(&profiles, "density", None, None),
        Err(SnowgridError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        HeightWindow::new(450.0, 410.0),
        Err(SnowgridError::InvalidConfiguration { .. })
    ));
    let inverted = HeightWindow {
        min: 450.0,
        max: 410.0,
    };
    assert!(matches!(
        GridResampler::default().create_grid(&profiles, "density", None, Some(inverted)),
        Err(SnowgridError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        GridResampler::default().create_grid(&profiles, "colour", None, None),
        Err(SnowgridError::UnrecognizedVariable { .. })
    ));
}

#[test]
fn test_difference_of_identical_runs() {
    let profiles = test_sequence("density");
    let resampler = GridResampler::default();
    let a = resampler.create_grid(&profiles, "density", None, None).unwrap();
    let b = resampler.create_grid(&profiles, "density", None, None).unwrap();

    let diff = a.difference(&b).unwrap();
    assert!(diff.values.iter().all(|v| v.is_nan() || *v == 0.0));
    assert_eq!(diff.coverage(), a.coverage());
}

proptest! {
    #[test]
    fn prop_grid_shape_matches_resolution_and_window(
        resolution in 2usize..60,
        start_day in 26u32..30,
        span in 0u32..3,
    ) {
        let profiles = test_sequence("density");
        let window = TimeWindow::new(datetime(start_day), datetime(start_day + span));
        let expected = profiles
            .iter()
            .filter(|p| window.contains(p.timestamp()))
            .count();

        let grid = resampler(resolution)
            .create_grid(&profiles, "density", Some(window), None)
            .unwrap();

        prop_assert_eq!(grid.shape(), (resolution, expected));
        prop_assert_eq!(grid.timestamps.len(), expected);
    }
}
