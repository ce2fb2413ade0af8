//! Probe-removal detection
//!
//! Finds the contiguous time intervals during which the probe reported
//! `Probe Not Inserted`. Rows are already in time order, so a single pass is
//! enough.

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineRow;

/// An interval during which the probe was out of the food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeNotInsertedRange {
    /// Timestamp of the first not-inserted row
    pub lower: f64,
    /// Timestamp of the last not-inserted row
    pub upper: f64,
}

impl ProbeNotInsertedRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Key for list rendering, e.g. `"5.0_10.0"`
    pub fn id(&self) -> String {
        format!("{:?}_{:?}", self.lower, self.upper)
    }

    /// Length of the interval in seconds
    pub fn duration(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a timestamp falls inside the interval (inclusive)
    pub fn contains(&self, timestamp: f64) -> bool {
        timestamp >= self.lower && timestamp <= self.upper
    }
}

/// Interval under construction
#[derive(Debug, Clone, Copy)]
struct OpenRange {
    lower: f64,
    upper: f64,
    closed: bool,
}

/// Derives [`ProbeNotInsertedRange`]s from the prediction state of each row
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeRangeAnalyzer;

impl ProbeRangeAnalyzer {
    /// Scan rows in order and return every not-inserted interval
    ///
    /// A run of not-inserted rows becomes one range from its first to its last
    /// timestamp; a single row gives `lower == upper`. A run still open at the
    /// end of the data is returned as well.
    pub fn analyze(rows: &[TimelineRow]) -> Vec<ProbeNotInsertedRange> {
        let mut ranges: Vec<OpenRange> = Vec::new();

        for row in rows {
            if !row.prediction_state.is_probe_not_inserted() {
                if let Some(last) = ranges.last_mut() {
                    last.closed = true;
                }
                continue;
            }

            match ranges.last_mut() {
                Some(last) if !last.closed => last.upper = row.timestamp,
                _ => ranges.push(OpenRange {
                    lower: row.timestamp,
                    upper: row.timestamp,
                    closed: false,
                }),
            }
        }

        ranges
            .into_iter()
            .map(|r| ProbeNotInsertedRange::new(r.lower, r.upper))
            .collect()
    }

    /// Total seconds spent with the probe out of the food
    pub fn total_duration(ranges: &[ProbeNotInsertedRange]) -> f64 {
        ranges.iter().map(ProbeNotInsertedRange::duration).sum()
    }
}
