//! SMET time series reading.
//!
//! SMET files carry the meteorological forcing and surface output of a
//! snowpack run: a `[HEADER]` of `key = value` lines, then whitespace
//! separated `[DATA]` rows whose first column is an ISO timestamp.

use crate::constants::{DATES_COLUMN, SMET_DATETIME_FORMAT, SMET_DEFAULT_NODATA};
use crate::error::{Result, SnowgridError};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::debug;

const DATA_MARKER: &str = "[DATA]";
const HEADER_MARKER: &str = "[HEADER]";

/// One field of a SMET file over time, no-data values read as NaN
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub field: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of non-NaN values
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Two-column frame: `dates` and the field
    pub fn to_frame(&self) -> Result<DataFrame> {
        let millis: Vec<i64> = self
            .timestamps
            .iter()
            .map(|t| t.and_utc().timestamp_millis())
            .collect();
        let dates = Int64Chunked::from_vec(DATES_COLUMN.into(), millis)
            .into_datetime(TimeUnit::Milliseconds, None);

        Ok(DataFrame::new(vec![
            Column::from(dates.into_series()),
            Column::new(self.field.as_str().into(), self.values.clone()),
        ])?)
    }
}

/// Header keys the reader cares about
#[derive(Debug, Default)]
struct SmetHeader {
    fields: Vec<String>,
    nodata: Option<f64>,
}

impl SmetHeader {
    fn parse_line(&mut self, line: &str, line_index: usize) -> Result<()> {
        let Some((key, value)) = line.split_once('=') else {
            return Ok(());
        };

        match key.trim() {
            "fields" => {
                self.fields = value.split_whitespace().map(str::to_string).collect();
            }
            "nodata" => {
                let value = value.trim();
                let nodata = value.parse().map_err(|_| SnowgridError::ValueConversion {
                    code: "nodata".to_string(),
                    line_index,
                    token: value.to_string(),
                })?;
                self.nodata = Some(nodata);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Read one field of a SMET file
pub fn read_smet(path: impl AsRef<Path>, field: &str) -> Result<TimeSeries> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SnowgridError::io(path, e))?;
    let series = parse_smet(path, &content, field)?;

    debug!(
        "Read {} values of {} from {} ({} valid)",
        series.len(),
        field,
        path.display(),
        series.valid_count()
    );
    Ok(series)
}

fn parse_smet(path: &Path, content: &str, field: &str) -> Result<TimeSeries> {
    let mut header = SmetHeader::default();
    let mut data_start = None;
    let mut total_lines = 0;

    for (index, line) in content.lines().enumerate() {
        total_lines = index + 1;
        let trimmed = line.trim();
        if trimmed == DATA_MARKER {
            data_start = Some(index + 1);
            break;
        }
        if trimmed.is_empty() || trimmed == HEADER_MARKER || trimmed.starts_with('#') {
            continue;
        }
        header.parse_line(trimmed, index + 1)?;
    }

    let data_start = data_start.ok_or_else(|| SnowgridError::MalformedLine {
        code: DATA_MARKER.to_string(),
        line_index: total_lines,
        reason: "no [DATA] section".to_string(),
    })?;

    // Column 0 holds the timestamp
    let column = header
        .fields
        .iter()
        .position(|name| name == field)
        .filter(|&position| position > 0)
        .ok_or_else(|| SnowgridError::MissingField {
            path: path.to_path_buf(),
            field: field.to_string(),
        })?;
    let nodata = header.nodata.unwrap_or(SMET_DEFAULT_NODATA);

    let mut timestamps = Vec::new();
    let mut values = Vec::new();

    for (index, line) in content.lines().enumerate().skip(data_start) {
        let line_index = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let timestamp = NaiveDateTime::parse_from_str(tokens[0], SMET_DATETIME_FORMAT).map_err(
            |source| SnowgridError::MalformedTimestamp {
                code: "timestamp".to_string(),
                line_index,
                value: tokens[0].to_string(),
                source,
            },
        )?;

        let token = tokens
            .get(column)
            .ok_or_else(|| SnowgridError::MalformedLine {
                code: field.to_string(),
                line_index,
                reason: format!("expected {} columns, found {}", column + 1, tokens.len()),
            })?;
        let value: f64 = token.parse().map_err(|_| SnowgridError::ValueConversion {
            code: field.to_string(),
            line_index,
            token: token.to_string(),
        })?;

        timestamps.push(timestamp);
        values.push(if value == nodata { f64::NAN } else { value });
    }

    Ok(TimeSeries {
        field: field.to_string(),
        timestamps,
        values,
    })
}
