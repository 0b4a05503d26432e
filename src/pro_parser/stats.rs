//! Parsing statistics and result structures for .PRO processing

use crate::models::ProfileSequence;
use std::collections::BTreeMap;

/// Parsing result with profiles and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Decoded snapshots in file order
    pub profiles: ProfileSequence,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Lines in the file
    pub total_lines: usize,

    /// Lines kept per active field code, header rows included
    pub lines_per_code: BTreeMap<String, usize>,

    /// Lines whose code was not active (other fields, station metadata)
    pub lines_ignored: usize,

    /// Header rows removed from the buckets
    pub header_rows: usize,

    /// Number of profiles assembled
    pub profiles_built: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that were bucketed for any active code
    pub fn lines_bucketed(&self) -> usize {
        self.lines_per_code.values().sum()
    }

    /// Share of file lines that carried active fields, as a percentage
    pub fn bucketed_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.lines_bucketed() as f64 / self.total_lines as f64) * 100.0
        }
    }
}
