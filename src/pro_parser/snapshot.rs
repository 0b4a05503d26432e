//! Snapshot assembly
//!
//! Builds the [`Profile`] of one time index from the bucketed record lines:
//! decode every field, derive layer thickness from consecutive heights, then
//! drop the reference row that only seeded the thickness.

use super::buckets::FieldBuckets;
use super::decoder::decode_line;
use crate::constants::{
    CM_PER_M, DATE_CODE, DATES_COLUMN, HEIGHT_CODE, THICKNESS_COLUMN, THICKNESS_SENTINEL,
};
use crate::error::{Result, SnowgridError};
use crate::models::Profile;
use crate::registry::name_for_code;
use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::debug;

/// Assemble the profile for time index `index`
pub fn assemble_snapshot(index: usize, buckets: &FieldBuckets<'_>) -> Result<Profile> {
    if buckets.is_empty() {
        return Err(SnowgridError::EmptySnapshot { index });
    }

    let date_line = buckets
        .get(DATE_CODE)
        .ok_or(SnowgridError::EmptySnapshot { index })?
        .get(index)
        .ok_or(SnowgridError::EmptySnapshot { index })?;
    let Some(timestamp) = decode_line(DATE_CODE, date_line.text, date_line.line_number)?
        .as_timestamp()
    else {
        return Err(SnowgridError::EmptySnapshot { index });
    };

    let mut fields: Vec<(&'static str, Vec<f64>)> = Vec::new();
    for (code, lines) in buckets.iter() {
        if code == DATE_CODE {
            continue;
        }
        let line = lines
            .get(index)
            .ok_or_else(|| inconsistent(buckets, code))?;
        let Some(values) = decode_line(code, line.text, line.line_number)?.into_values() else {
            return Err(SnowgridError::MalformedLine {
                code: code.to_string(),
                line_index: line.line_number,
                reason: "expected layer values".to_string(),
            });
        };
        fields.push((name_for_code(code)?, values));
    }

    if fields.is_empty() {
        return Err(SnowgridError::EmptySnapshot { index });
    }

    let height_name = name_for_code(HEIGHT_CODE)?;
    let heights = fields
        .iter()
        .find(|(name, _)| *name == height_name)
        .map(|(_, values)| values.clone())
        .ok_or_else(|| SnowgridError::MissingField {
            path: buckets.source().to_path_buf(),
            field: height_name.to_string(),
        })?;

    for (name, values) in &fields {
        if values.len() != heights.len() {
            return Err(SnowgridError::InconsistentLayerCount {
                index,
                column: name.to_string(),
                expected: heights.len(),
                found: values.len(),
            });
        }
    }

    let full = build_frame(fields, &heights, timestamp)?;
    let layers = full.height().saturating_sub(1);
    debug!(
        "Snapshot {} at {}: {} layers, {} columns",
        index,
        timestamp,
        layers,
        full.width()
    );

    Ok(Profile::new(timestamp, full.slice(1, layers)))
}

/// Full table including the reference row, with derived thickness and dates
fn build_frame(
    fields: Vec<(&'static str, Vec<f64>)>,
    heights: &[f64],
    timestamp: NaiveDateTime,
) -> Result<DataFrame> {
    let rows = heights.len();
    let mut columns: Vec<Column> = fields
        .into_iter()
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();

    columns.push(Column::new(THICKNESS_COLUMN.into(), layer_thickness(heights)));

    let dates = Int64Chunked::from_vec(
        DATES_COLUMN.into(),
        vec![timestamp.and_utc().timestamp_millis(); rows],
    )
    .into_datetime(TimeUnit::Milliseconds, None);
    columns.push(Column::from(dates.into_series()));

    Ok(DataFrame::new(columns)?)
}

/// Layer thickness (m) from heights (cm).
///
/// Row 0 has no layer below it and gets [`THICKNESS_SENTINEL`]; row k gets the
/// offset difference to row k-1, with offsets taken relative to row 0.
pub fn layer_thickness(heights: &[f64]) -> Vec<f64> {
    let Some(&reference) = heights.first() else {
        return Vec::new();
    };
    let offsets: Vec<f64> = heights.iter().map(|h| h - reference).collect();

    std::iter::once(THICKNESS_SENTINEL)
        .chain(offsets.windows(2).map(|pair| (pair[1] - pair[0]) / CM_PER_M))
        .collect()
}

fn inconsistent(buckets: &FieldBuckets<'_>, code: &str) -> SnowgridError {
    SnowgridError::InconsistentTimeSeries {
        path: buckets.source().to_path_buf(),
        code: code.to_string(),
        expected: buckets.count(DATE_CODE),
        found: buckets.count(code),
    }
}
