//! Record line decoding
//!
//! Turns one raw `<code>,<count>,...,<values>` line into either the snapshot
//! timestamp (date code) or the per-layer values of a numeric field.

use crate::constants::{DATE_CODE, GRAIN_TYPE_CODE, PRO_DATETIME_FORMAT};
use crate::error::{Result, SnowgridError};
use chrono::NaiveDateTime;

/// Payload of one decoded record line
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    Timestamp(NaiveDateTime),
    Values(Vec<f64>),
}

impl DecodedLine {
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            DecodedLine::Timestamp(ts) => Some(*ts),
            DecodedLine::Values(_) => None,
        }
    }

    pub fn into_values(self) -> Option<Vec<f64>> {
        match self {
            DecodedLine::Values(values) => Some(values),
            DecodedLine::Timestamp(_) => None,
        }
    }
}

/// Decode a record line known to belong to `code`.
///
/// `line_index` is only used to attribute errors.
pub fn decode_line(code: &str, line: &str, line_index: usize) -> Result<DecodedLine> {
    let numeric = code_value(code, line_index)?;
    let date_value = code_value(DATE_CODE, line_index)?;

    if numeric == date_value {
        decode_timestamp(line, line_index).map(DecodedLine::Timestamp)
    } else if numeric > date_value {
        decode_values(code, line, line_index).map(DecodedLine::Values)
    } else {
        Err(malformed(code, line_index, "code is below the date code"))
    }
}

/// Decode the snapshot time from a date line.
///
/// The date is the final token, which covers both `0500,<date>` and the
/// count-prefixed `0500,1,<date>` layouts.
pub fn decode_timestamp(line: &str, line_index: usize) -> Result<NaiveDateTime> {
    let tokens = split_record(DATE_CODE, line, line_index)?;
    let raw = tokens
        .get(1..)
        .and_then(|rest| rest.last())
        .ok_or_else(|| malformed(DATE_CODE, line_index, "missing date"))?;
    let value = raw.trim();

    NaiveDateTime::parse_from_str(value, PRO_DATETIME_FORMAT).map_err(|source| {
        SnowgridError::MalformedTimestamp {
            code: DATE_CODE.to_string(),
            line_index,
            value: value.to_string(),
            source,
        }
    })
}

/// Decode the per-layer values of a numeric field line.
///
/// Token 1 is the datapoint count `n` and the datapoints are the last `n`
/// tokens; anything between the two is metadata and is skipped.
pub fn decode_values(code: &str, line: &str, line_index: usize) -> Result<Vec<f64>> {
    let tokens = split_record(code, line, line_index)?;

    let count_token = tokens
        .get(1)
        .ok_or_else(|| malformed(code, line_index, "missing datapoint count"))?;
    let count: usize = count_token.trim().parse().map_err(|_| {
        malformed(
            code,
            line_index,
            format!("invalid datapoint count '{}'", count_token.trim()),
        )
    })?;

    let available = tokens.len() - 2;
    if count > available {
        return Err(malformed(
            code,
            line_index,
            format!("count {} exceeds the {} values present", count, available),
        ));
    }

    let mut values = tokens[tokens.len() - count..]
        .iter()
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| SnowgridError::ValueConversion {
                    code: code.to_string(),
                    line_index,
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    // Format quirk: grain type lines end with one value past the last layer.
    // Only this code drops it.
    if code == GRAIN_TYPE_CODE {
        values.pop();
    }

    Ok(values)
}

fn split_record<'a>(code: &str, line: &'a str, line_index: usize) -> Result<Vec<&'a str>> {
    let tokens: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();

    match tokens.first() {
        Some(first) if first.trim() == code => Ok(tokens),
        Some(first) => Err(malformed(
            code,
            line_index,
            format!("line starts with '{}'", first.trim()),
        )),
        None => Err(malformed(code, line_index, "empty line")),
    }
}

fn code_value(code: &str, line_index: usize) -> Result<u32> {
    code.parse::<u32>()
        .map_err(|_| malformed(code, line_index, "field code is not numeric"))
}

fn malformed(code: &str, line_index: usize, reason: impl Into<String>) -> SnowgridError {
    SnowgridError::MalformedLine {
        code: code.to_string(),
        line_index,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_code_value() {
        assert_eq!(code_value("0513", 0).unwrap(), 513);
        assert!(code_value("05x3", 0).is_err());
    }

    #[test]
    fn test_split_record_strips_line_terminators() {
        let tokens = split_record("0502", "0502,2,1.5,2.5\r\n", 3).unwrap();
        assert_eq!(tokens, vec!["0502", "2", "1.5", "2.5"]);
    }

    #[test]
    fn test_decode_line_dispatches_on_code() {
        let date = decode_line("0500", "0500,27.01.2020 00:00:00\n", 1).unwrap();
        assert_eq!(
            date.as_timestamp(),
            NaiveDate::from_ymd_opt(2020, 1, 27).unwrap().and_hms_opt(0, 0, 0)
        );

        let values = decode_line("0503", "0503,2,-1.5,-0.25", 2).unwrap();
        assert_eq!(values.into_values(), Some(vec![-1.5, -0.25]));
    }
}
