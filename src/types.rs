//! Core data types for CookVis-RS
//!
//! This module contains the scalar and enumeration types that make up a
//! [`TimelineRow`], along with the curve catalogue used by renderers.
//!
//! # Main Types
//!
//! - [`TemperatureValue`] - Dual-unit temperature (Celsius authoritative)
//! - [`TemperatureUnit`] - Celsius or Fahrenheit
//! - [`Sensor`] - Physical probe channel T1..T8
//! - [`PredictionState`], [`PredictionMode`], [`PredictionType`] - Prediction metadata
//! - [`Curve`] - The eleven plottable temperature curves
//!
//! # Wire Labels
//!
//! Enumerations are written to CSV using their human-readable labels
//! (`"Probe Not Inserted"`, `"Time to Removal"`), never the Rust identifiers.
//! Label matching is exact and case-sensitive.

use serde::{Deserialize, Serialize};

use crate::timeline::TimelineRow;

/// Temperature scale used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[default]
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl TemperatureUnit {
    /// Unit suffix for labels
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Get all units
    pub fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureUnit::Celsius => write!(f, "celsius"),
            TemperatureUnit::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// A temperature held in both scales
///
/// Celsius is authoritative and is the only value written to disk. The
/// Fahrenheit value is derived whenever the value is constructed, so the two
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct TemperatureValue {
    celsius: f32,
    fahrenheit: f32,
}

impl TemperatureValue {
    /// Create from a Celsius reading
    pub fn from_celsius(celsius: f32) -> Self {
        Self {
            celsius,
            fahrenheit: Self::celsius_to_fahrenheit(celsius),
        }
    }

    /// Create from a Fahrenheit reading
    pub fn from_fahrenheit(fahrenheit: f32) -> Self {
        Self {
            celsius: Self::fahrenheit_to_celsius(fahrenheit),
            fahrenheit,
        }
    }

    /// Value in degrees Celsius
    pub fn celsius(&self) -> f32 {
        self.celsius
    }

    /// Value in degrees Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        self.fahrenheit
    }

    /// Value in the requested unit
    pub fn value_for(&self, unit: TemperatureUnit) -> f32 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }

    pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
        celsius * 9.0 / 5.0 + 32.0
    }

    pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
        (fahrenheit - 32.0) * 5.0 / 9.0
    }
}

impl Default for TemperatureValue {
    fn default() -> Self {
        Self::from_celsius(0.0)
    }
}

impl From<f32> for TemperatureValue {
    fn from(celsius: f32) -> Self {
        Self::from_celsius(celsius)
    }
}

impl From<TemperatureValue> for f32 {
    fn from(value: TemperatureValue) -> Self {
        value.celsius
    }
}

/// Physical probe channel feeding a virtual sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sensor {
    #[default]
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
}

impl Sensor {
    /// Label used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            Sensor::T1 => "T1",
            Sensor::T2 => "T2",
            Sensor::T3 => "T3",
            Sensor::T4 => "T4",
            Sensor::T5 => "T5",
            Sensor::T6 => "T6",
            Sensor::T7 => "T7",
            Sensor::T8 => "T8",
        }
    }

    /// Parse a CSV label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.label() == label)
    }

    /// Zero-based channel index
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get all sensors in channel order
    pub fn all() -> &'static [Sensor] {
        &[
            Sensor::T1,
            Sensor::T2,
            Sensor::T3,
            Sensor::T4,
            Sensor::T5,
            Sensor::T6,
            Sensor::T7,
            Sensor::T8,
        ]
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State of the probe's cook prediction engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PredictionState {
    /// Probe is outside the food
    #[default]
    ProbeNotInserted,
    ProbeInserted,
    Cooking,
    Predicting,
    RemovalPredictionDone,
}

impl PredictionState {
    /// Label used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            PredictionState::ProbeNotInserted => "Probe Not Inserted",
            PredictionState::ProbeInserted => "Probe Inserted",
            PredictionState::Cooking => "Cooking",
            PredictionState::Predicting => "Predicting",
            PredictionState::RemovalPredictionDone => "Removal Prediction Done",
        }
    }

    /// Parse a CSV label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.label() == label)
    }

    /// Check if the probe is out of the food
    pub fn is_probe_not_inserted(&self) -> bool {
        matches!(self, PredictionState::ProbeNotInserted)
    }

    /// Get all states
    pub fn all() -> &'static [PredictionState] {
        &[
            PredictionState::ProbeNotInserted,
            PredictionState::ProbeInserted,
            PredictionState::Cooking,
            PredictionState::Predicting,
            PredictionState::RemovalPredictionDone,
        ]
    }
}

impl std::fmt::Display for PredictionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Prediction mode selected on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PredictionMode {
    #[default]
    None,
    TimeToRemoval,
}

impl PredictionMode {
    /// Label used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            PredictionMode::None => "None",
            PredictionMode::TimeToRemoval => "Time to Removal",
        }
    }

    /// Parse a CSV label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "None" => Some(PredictionMode::None),
            "Time to Removal" => Some(PredictionMode::TimeToRemoval),
            _ => None,
        }
    }
}

impl std::fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of prediction being computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PredictionType {
    #[default]
    None,
    Removal,
}

impl PredictionType {
    /// Label used in the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            PredictionType::None => "None",
            PredictionType::Removal => "Removal",
        }
    }

    /// Parse a CSV label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "None" => Some(PredictionType::None),
            "Removal" => Some(PredictionType::Removal),
            _ => None,
        }
    }
}

impl std::fmt::Display for PredictionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A plottable temperature curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    Core,
    Surface,
    Ambient,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
}

impl Curve {
    /// Legend label for this curve
    pub fn display_name(&self) -> &'static str {
        match self {
            Curve::Core => "Core Temperature",
            Curve::Surface => "Surface Temperature",
            Curve::Ambient => "Ambient Temperature",
            Curve::T1 => "T1 (Tip)",
            Curve::T2 => "T2",
            Curve::T3 => "T3",
            Curve::T4 => "T4",
            Curve::T5 => "T5",
            Curve::T6 => "T6",
            Curve::T7 => "T7",
            Curve::T8 => "T8 (Handle)",
        }
    }

    /// The reading this curve plots for a row
    pub fn reading(&self, row: &TimelineRow) -> TemperatureValue {
        match self {
            Curve::Core => row.virtual_core,
            Curve::Surface => row.virtual_surface,
            Curve::Ambient => row.virtual_ambient,
            Curve::T1 => row.channels[0],
            Curve::T2 => row.channels[1],
            Curve::T3 => row.channels[2],
            Curve::T4 => row.channels[3],
            Curve::T5 => row.channels[4],
            Curve::T6 => row.channels[5],
            Curve::T7 => row.channels[6],
            Curve::T8 => row.channels[7],
        }
    }

    /// Get all curves in legend order
    pub fn all() -> &'static [Curve] {
        &[
            Curve::Core,
            Curve::Surface,
            Curve::Ambient,
            Curve::T1,
            Curve::T2,
            Curve::T3,
            Curve::T4,
            Curve::T5,
            Curve::T6,
            Curve::T7,
            Curve::T8,
        ]
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Format seconds since cook start as an hour/minute label
///
/// Labels under one hour show minutes only (`"07m"`), longer ones show both
/// (`"02h 05m"`). Seconds are truncated.
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let minutes = (total / 60) % 60;
    let hours = total / 3600;

    if hours == 0 {
        format!("{:02}m", minutes)
    } else {
        format!("{:02}h {:02}m", hours, minutes)
    }
}
