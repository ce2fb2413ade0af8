//! A single timeline record
//!
//! [`TimelineRow`] is one CSV data line decoded into typed fields. Decoding
//! runs through [`FIELD_TABLE`], an ordered list of `(header, decoder)` pairs:
//! each decoder parses the raw cell and stores it on the row, and the first
//! decoder that fails rejects the whole row.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{CookVisError, Result};
use crate::types::{PredictionMode, PredictionState, PredictionType, Sensor, TemperatureValue};

pub const TIMESTAMP: &str = "Timestamp";
pub const SESSION_ID: &str = "SessionID";
pub const SEQUENCE_NUMBER: &str = "SequenceNumber";
pub const T1: &str = "T1";
pub const T2: &str = "T2";
pub const T3: &str = "T3";
pub const T4: &str = "T4";
pub const T5: &str = "T5";
pub const T6: &str = "T6";
pub const T7: &str = "T7";
pub const T8: &str = "T8";
pub const VIRTUAL_CORE_TEMPERATURE: &str = "VirtualCoreTemperature";
pub const VIRTUAL_SURFACE_TEMPERATURE: &str = "VirtualSurfaceTemperature";
pub const VIRTUAL_AMBIENT_TEMPERATURE: &str = "VirtualAmbientTemperature";
pub const ESTIMATED_CORE_TEMPERATURE: &str = "EstimatedCoreTemperature";
pub const PREDICTION_SET_POINT: &str = "PredictionSetPoint";
pub const VIRTUAL_CORE_SENSOR: &str = "VirtualCoreSensor";
pub const VIRTUAL_SURFACE_SENSOR: &str = "VirtualSurfaceSensor";
pub const VIRTUAL_AMBIENT_SENSOR: &str = "VirtualAmbientSensor";
pub const PREDICTION_STATE: &str = "PredictionState";
pub const PREDICTION_MODE: &str = "PredictionMode";
pub const PREDICTION_TYPE: &str = "PredictionType";
pub const PREDICTION_VALUE_SECONDS: &str = "PredictionValueSeconds";
pub const NOTES: &str = "Notes";

/// Every column of a device export, in export order
pub const COLUMN_HEADERS: [&str; 24] = [
    TIMESTAMP,
    SESSION_ID,
    SEQUENCE_NUMBER,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    VIRTUAL_CORE_TEMPERATURE,
    VIRTUAL_SURFACE_TEMPERATURE,
    VIRTUAL_AMBIENT_TEMPERATURE,
    ESTIMATED_CORE_TEMPERATURE,
    PREDICTION_SET_POINT,
    VIRTUAL_CORE_SENSOR,
    VIRTUAL_SURFACE_SENSOR,
    VIRTUAL_AMBIENT_SENSOR,
    PREDICTION_STATE,
    PREDICTION_MODE,
    PREDICTION_TYPE,
    PREDICTION_VALUE_SECONDS,
    NOTES,
];

/// Parses one raw cell into the row; `None` rejects the row
pub type FieldDecoder = fn(&mut TimelineRow, &str) -> Option<()>;

/// Required columns and how each one is decoded, in export order
pub const FIELD_TABLE: &[(&str, FieldDecoder)] = &[
    (TIMESTAMP, |row, v| {
        row.timestamp = v.parse().ok()?;
        Some(())
    }),
    (SESSION_ID, |row, v| {
        row.session_id = v.to_string();
        Some(())
    }),
    (SEQUENCE_NUMBER, |row, v| {
        row.sequence_number = v.parse().ok()?;
        Some(())
    }),
    (T1, |row, v| {
        row.channels[0] = parse_temperature(v)?;
        Some(())
    }),
    (T2, |row, v| {
        row.channels[1] = parse_temperature(v)?;
        Some(())
    }),
    (T3, |row, v| {
        row.channels[2] = parse_temperature(v)?;
        Some(())
    }),
    (T4, |row, v| {
        row.channels[3] = parse_temperature(v)?;
        Some(())
    }),
    (T5, |row, v| {
        row.channels[4] = parse_temperature(v)?;
        Some(())
    }),
    (T6, |row, v| {
        row.channels[5] = parse_temperature(v)?;
        Some(())
    }),
    (T7, |row, v| {
        row.channels[6] = parse_temperature(v)?;
        Some(())
    }),
    (T8, |row, v| {
        row.channels[7] = parse_temperature(v)?;
        Some(())
    }),
    (VIRTUAL_CORE_TEMPERATURE, |row, v| {
        row.virtual_core = parse_temperature(v)?;
        Some(())
    }),
    (VIRTUAL_SURFACE_TEMPERATURE, |row, v| {
        row.virtual_surface = parse_temperature(v)?;
        Some(())
    }),
    (VIRTUAL_AMBIENT_TEMPERATURE, |row, v| {
        row.virtual_ambient = parse_temperature(v)?;
        Some(())
    }),
    (ESTIMATED_CORE_TEMPERATURE, |row, v| {
        row.estimated_core = parse_temperature(v)?;
        Some(())
    }),
    (PREDICTION_SET_POINT, |row, v| {
        row.prediction_set_point = v.parse().ok()?;
        Some(())
    }),
    (VIRTUAL_CORE_SENSOR, |row, v| {
        row.virtual_core_sensor = Sensor::from_label(v)?;
        Some(())
    }),
    (VIRTUAL_SURFACE_SENSOR, |row, v| {
        row.virtual_surface_sensor = Sensor::from_label(v)?;
        Some(())
    }),
    (VIRTUAL_AMBIENT_SENSOR, |row, v| {
        row.virtual_ambient_sensor = Sensor::from_label(v)?;
        Some(())
    }),
    (PREDICTION_STATE, |row, v| {
        row.prediction_state = PredictionState::from_label(v)?;
        Some(())
    }),
    (PREDICTION_MODE, |row, v| {
        row.prediction_mode = PredictionMode::from_label(v)?;
        Some(())
    }),
    (PREDICTION_TYPE, |row, v| {
        row.prediction_type = PredictionType::from_label(v)?;
        Some(())
    }),
    (PREDICTION_VALUE_SECONDS, |row, v| {
        row.prediction_value_seconds = v.parse().ok()?;
        Some(())
    }),
];

fn parse_temperature(value: &str) -> Option<TemperatureValue> {
    value.parse::<f32>().ok().map(TemperatureValue::from_celsius)
}

/// Check if a header belongs to the device export contract
pub fn is_known_header(header: &str) -> bool {
    COLUMN_HEADERS.contains(&header)
}

/// Format a single-precision cell
///
/// Uses the shortest representation that parses back to the same value and
/// always keeps a fractional part (`20.0`, `23.45`).
pub fn format_f32(value: f32) -> String {
    format!("{:?}", value)
}

/// Format a double-precision cell, same rules as [`format_f32`]
pub fn format_f64(value: f64) -> String {
    format!("{:?}", value)
}

/// One sample of a cook session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Seconds since cook start, also the time axis
    pub timestamp: f64,
    pub session_id: String,
    /// Row identity within its session
    pub sequence_number: i64,

    /// Raw readings of the physical channels T1..T8
    pub channels: [TemperatureValue; 8],

    pub virtual_core: TemperatureValue,
    pub virtual_surface: TemperatureValue,
    pub virtual_ambient: TemperatureValue,
    pub estimated_core: TemperatureValue,
    pub prediction_set_point: f32,

    /// Channel feeding each virtual sensor at this sample
    pub virtual_core_sensor: Sensor,
    pub virtual_surface_sensor: Sensor,
    pub virtual_ambient_sensor: Sensor,

    pub prediction_state: PredictionState,
    pub prediction_mode: PredictionMode,
    pub prediction_type: PredictionType,
    pub prediction_value_seconds: i64,

    /// User annotation; never `Some("")`
    pub note: Option<String>,

    /// Cells from columns outside the export contract, written back verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl TimelineRow {
    /// Create a row with default readings
    pub fn new(sequence_number: i64, timestamp: f64) -> Self {
        Self {
            sequence_number,
            timestamp,
            ..Default::default()
        }
    }

    /// Set the prediction state
    pub fn with_state(mut self, state: PredictionState) -> Self {
        self.prediction_state = state;
        self
    }

    /// Set the annotation
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.set_note(Some(note.into()));
        self
    }

    /// Set the virtual core reading
    pub fn with_core(mut self, celsius: f32) -> Self {
        self.virtual_core = TemperatureValue::from_celsius(celsius);
        self
    }

    /// Reading of a physical channel
    pub fn channel(&self, sensor: Sensor) -> TemperatureValue {
        self.channels[sensor.index()]
    }

    /// Check if the row carries a non-empty note
    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Replace the note; empty text clears it
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note.filter(|n| !n.is_empty());
    }

    /// Decode a row from a header → cell map
    ///
    /// Every column in [`FIELD_TABLE`] must be present and valid. The notes
    /// column is optional and an empty cell means no note.
    pub fn decode(fields: &HashMap<&str, &str>) -> Result<Self> {
        let mut row = TimelineRow::default();

        for (header, decode) in FIELD_TABLE {
            let value = fields.get(header).copied();
            if value.and_then(|v| decode(&mut row, v)).is_none() {
                return Err(CookVisError::invalid_field(*header, value));
            }
        }

        row.set_note(fields.get(NOTES).map(|n| n.to_string()));

        for (header, value) in fields {
            if !is_known_header(header) {
                row.extra.insert(header.to_string(), value.to_string());
            }
        }

        Ok(row)
    }

    /// Cell text for a column, `None` when the row has no value for it
    pub fn field_value(&self, header: &str) -> Option<String> {
        let value = match header {
            TIMESTAMP => format_f64(self.timestamp),
            SESSION_ID => self.session_id.clone(),
            SEQUENCE_NUMBER => self.sequence_number.to_string(),
            T1 => format_f32(self.channels[0].celsius()),
            T2 => format_f32(self.channels[1].celsius()),
            T3 => format_f32(self.channels[2].celsius()),
            T4 => format_f32(self.channels[3].celsius()),
            T5 => format_f32(self.channels[4].celsius()),
            T6 => format_f32(self.channels[5].celsius()),
            T7 => format_f32(self.channels[6].celsius()),
            T8 => format_f32(self.channels[7].celsius()),
            VIRTUAL_CORE_TEMPERATURE => format_f32(self.virtual_core.celsius()),
            VIRTUAL_SURFACE_TEMPERATURE => format_f32(self.virtual_surface.celsius()),
            VIRTUAL_AMBIENT_TEMPERATURE => format_f32(self.virtual_ambient.celsius()),
            ESTIMATED_CORE_TEMPERATURE => format_f32(self.estimated_core.celsius()),
            PREDICTION_SET_POINT => format_f32(self.prediction_set_point),
            VIRTUAL_CORE_SENSOR => self.virtual_core_sensor.label().to_string(),
            VIRTUAL_SURFACE_SENSOR => self.virtual_surface_sensor.label().to_string(),
            VIRTUAL_AMBIENT_SENSOR => self.virtual_ambient_sensor.label().to_string(),
            PREDICTION_STATE => self.prediction_state.label().to_string(),
            PREDICTION_MODE => self.prediction_mode.label().to_string(),
            PREDICTION_TYPE => self.prediction_type.label().to_string(),
            PREDICTION_VALUE_SECONDS => self.prediction_value_seconds.to_string(),
            NOTES => return self.note.clone(),
            other => return self.extra.get(other).cloned(),
        };
        Some(value)
    }
}
