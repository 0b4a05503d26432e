//! Core .PRO parser implementation
//!
//! This module provides the main parser orchestration: variable resolution,
//! whole-file reading, bucketing lines by field code, header removal, and
//! driving the snapshot assembler over every time index.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::buckets::{FieldBuckets, RecordLine};
use super::snapshot::assemble_snapshot;
use super::stats::{ParseResult, ParseStats};
use crate::config::SnowgridConfig;
use crate::constants::{CODE_WIDTH, DATE_CODE, HEIGHT_CODE};
use crate::error::{Result, SnowgridError};
use crate::models::ProfileSequence;
use crate::registry::{Variable, resolve_variable};

/// Path reported in errors for content parsed from memory
const MEMORY_SOURCE: &str = "<memory>";

/// Parser for snowpack .PRO profile files
#[derive(Debug, Clone, Default)]
pub struct ProParser {
    config: SnowgridConfig,
}

impl ProParser {
    pub fn new(config: SnowgridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnowgridConfig {
        &self.config
    }

    /// Read a .PRO file into its profile sequence.
    ///
    /// `variable` restricts decoding to one field (alias or full name); with
    /// `None` the configured default set is decoded.
    pub fn read_pro(&self, path: &Path, variable: Option<&str>) -> Result<ProfileSequence> {
        self.parse_file(path, variable).map(|result| result.profiles)
    }

    /// Read a .PRO file and return the profiles with parsing statistics
    pub fn parse_file(&self, path: &Path, variable: Option<&str>) -> Result<ParseResult> {
        // Resolve before touching the file so a bad variable fails fast
        let variable = variable.map(resolve_variable).transpose()?;

        info!("Parsing .PRO file: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| SnowgridError::io(path, e))?;

        self.parse_content(&content, path, variable)
    }

    /// Parse .PRO content already held in memory
    pub fn parse_str(&self, content: &str, variable: Option<&str>) -> Result<ProfileSequence> {
        let variable = variable.map(resolve_variable).transpose()?;
        self.parse_content(content, Path::new(MEMORY_SOURCE), variable)
            .map(|result| result.profiles)
    }

    /// Field codes to bucket: date and height, plus the requested field or
    /// the default set
    pub fn active_codes(&self, variable: Option<Variable>) -> Result<BTreeSet<&'static str>> {
        let mut codes = BTreeSet::from([DATE_CODE, HEIGHT_CODE]);
        match variable {
            Some(variable) => codes.extend(variable.code()),
            None => codes.extend(self.config.default_code_entries()?),
        }
        Ok(codes)
    }

    fn parse_content(
        &self,
        content: &str,
        source: &Path,
        variable: Option<Variable>,
    ) -> Result<ParseResult> {
        let codes = self.active_codes(variable)?;
        debug!("Active field codes: {:?}", codes);

        let mut stats = ParseStats::new();
        let mut buckets = bucket_lines(content, source, codes, &mut stats);

        stats.header_rows = buckets.drop_header_rows();
        let snapshot_count = check_buckets(&buckets)?;

        let profiles = (0..snapshot_count)
            .map(|index| assemble_snapshot(index, &buckets))
            .collect::<Result<Vec<_>>>()?;
        stats.profiles_built = profiles.len();

        let profiles = ProfileSequence::new(profiles);
        warn_if_unordered(&profiles, source);

        info!(
            "Parsed {} profiles from {} lines ({:.1}% bucketed)",
            stats.profiles_built,
            stats.total_lines,
            stats.bucketed_rate()
        );

        Ok(ParseResult { profiles, stats })
    }
}

/// Read a .PRO file with the default configuration
pub fn read_pro(path: impl AsRef<Path>, variable: Option<&str>) -> Result<ProfileSequence> {
    ProParser::default().read_pro(path.as_ref(), variable)
}

/// Single pass over the content, keeping lines whose code prefix is active
fn bucket_lines<'a>(
    content: &'a str,
    source: &Path,
    codes: BTreeSet<&'static str>,
    stats: &mut ParseStats,
) -> FieldBuckets<'a> {
    let mut buckets = FieldBuckets::new(source, codes);

    for (index, text) in content.lines().enumerate() {
        stats.total_lines += 1;

        let kept = text.get(..CODE_WIDTH).is_some_and(|code| {
            buckets.push(
                code,
                RecordLine {
                    line_number: index + 1,
                    text,
                },
            )
        });

        if !kept {
            stats.lines_ignored += 1;
        }
    }

    for (code, lines) in buckets.iter() {
        // Counted before header removal
        stats.lines_per_code.insert(code.to_string(), lines.len());
    }

    buckets
}

/// Every bucket must hold one line per date; returns the number of dates
fn check_buckets(buckets: &FieldBuckets<'_>) -> Result<usize> {
    for (code, lines) in buckets.iter() {
        if lines.is_empty() {
            return Err(SnowgridError::MissingField {
                path: buckets.source().to_path_buf(),
                field: code.to_string(),
            });
        }
    }

    let expected = buckets.count(DATE_CODE);
    for (code, lines) in buckets.iter() {
        if lines.len() != expected {
            return Err(SnowgridError::InconsistentTimeSeries {
                path: buckets.source().to_path_buf(),
                code: code.to_string(),
                expected,
                found: lines.len(),
            });
        }
    }

    Ok(expected)
}

fn warn_if_unordered(profiles: &ProfileSequence, source: &Path) {
    let timestamps = profiles.timestamps();
    if let Some(position) = timestamps.windows(2).position(|pair| pair[1] < pair[0]) {
        warn!(
            "Snapshots in {} are not chronological: {} follows {}",
            source.display(),
            timestamps[position + 1],
            timestamps[position]
        );
    }
}
