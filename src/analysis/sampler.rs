//! Render-side sampling
//!
//! Helpers a chart layer uses to keep drawing cheap: decimation, time-based
//! row lookup, and per-curve point series. Nothing here feeds back into
//! analysis; annotations and probe ranges always use the full row set.

use crate::config::ViewerSettings;
use crate::timeline::TimelineRow;
use crate::types::{Curve, TemperatureUnit};

use super::{AnnotationIndex, ProbeNotInsertedRange, ProbeRangeAnalyzer};

/// Sampling interval of device exports in seconds
///
/// [`RenderSampler::nearest_row`] only finds rows that sit exactly on this
/// grid.
pub const TIMELINE_GRID_SECONDS: f64 = 5.0;

/// Stateless sampling helpers for renderers
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderSampler;

impl RenderSampler {
    /// Rows whose sequence number is a multiple of `every_n`, in order
    ///
    /// `every_n` of 0 or 1 keeps every row.
    pub fn decimate(rows: &[TimelineRow], every_n: u32) -> Vec<&TimelineRow> {
        if every_n <= 1 {
            return rows.iter().collect();
        }

        let every_n = i64::from(every_n);
        rows.iter()
            .filter(|r| r.sequence_number.rem_euclid(every_n) == 0)
            .collect()
    }

    /// Row at `time` snapped to the 5-second grid
    ///
    /// Returns the first row whose timestamp equals the snapped time. Data not
    /// sampled on the grid yields `None` rather than the closest row.
    pub fn nearest_row(rows: &[TimelineRow], time: f64) -> Option<&TimelineRow> {
        let snapped = (time / TIMELINE_GRID_SECONDS).round() * TIMELINE_GRID_SECONDS;
        rows.iter().find(|r| r.timestamp == snapped)
    }

    /// Rows to draw under the given settings
    pub fn display_rows<'a>(
        rows: &'a [TimelineRow],
        settings: &ViewerSettings,
    ) -> Vec<&'a TimelineRow> {
        Self::decimate(rows, settings.decimation())
    }

    /// Probe-removal ranges to shade, empty when shading is off
    pub fn probe_ranges_for_display(
        rows: &[TimelineRow],
        settings: &ViewerSettings,
    ) -> Vec<ProbeNotInsertedRange> {
        if !settings.show_probe_not_inserted {
            return Vec::new();
        }
        ProbeRangeAnalyzer::analyze(rows)
    }

    /// Note markers to draw, empty when note markers are off
    pub fn annotations_for_display<'a>(
        rows: &'a [TimelineRow],
        settings: &ViewerSettings,
    ) -> AnnotationIndex<'a> {
        if !settings.show_notes {
            return AnnotationIndex::default();
        }
        AnnotationIndex::new(rows)
    }

    /// `[timestamp, temperature]` points of one curve
    pub fn curve_series<'a>(
        rows: impl IntoIterator<Item = &'a TimelineRow>,
        curve: Curve,
        unit: TemperatureUnit,
    ) -> Vec<[f64; 2]> {
        rows.into_iter()
            .map(|row| [row.timestamp, f64::from(curve.reading(row).value_for(unit))])
            .collect()
    }

    /// Point series for every enabled curve
    pub fn enabled_series(
        rows: &[TimelineRow],
        settings: &ViewerSettings,
    ) -> Vec<(Curve, Vec<[f64; 2]>)> {
        let display = Self::display_rows(rows, settings);
        settings
            .enabled_curves
            .enabled()
            .map(|curve| {
                let points =
                    Self::curve_series(display.iter().copied(), curve, settings.temperature_unit);
                (curve, points)
            })
            .collect()
    }
}
