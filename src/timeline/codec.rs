//! CSV codec for device exports
//!
//! A device export is a free-text preamble, a blank line, and a
//! comma-separated table:
//!
//! ```text
//! Combustion Inc. Probe Data
//! Probe S/N: 10005205
//!
//! Timestamp,SessionID,SequenceNumber,T1,...,PredictionValueSeconds
//! 0,4F2A,0,21.5,...,0
//! ```
//!
//! Cells are never quoted, so parsing is a plain split on `,`. Rows that fail
//! to decode are dropped and logged; only a missing or empty preamble or table
//! section fails the whole document.

use std::collections::HashMap;

use crate::error::{CookVisError, Result};

use super::document::SessionDocument;
use super::row::{TimelineRow, NOTES};

/// Separator between the preamble and the table once line endings are normalized
const SECTION_SEPARATOR: &str = "\n\n";

/// A data line that was dropped while parsing
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedLine {
    /// One-based line number within the table (the header is line 1)
    pub line: usize,
    /// Column that failed to decode
    pub field: String,
}

/// Details of a parse beyond the document itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Data lines seen after the header, blank lines included
    pub data_lines: usize,
    /// Lines that did not decode into a row
    pub dropped: Vec<DroppedLine>,
    /// Whether a `Notes` column had to be appended to the headers
    pub notes_column_added: bool,
}

impl ParseReport {
    /// Number of rows that made it into the document
    pub fn accepted(&self) -> usize {
        self.data_lines - self.dropped.len()
    }
}

/// Converts between export text and [`SessionDocument`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl CsvCodec {
    /// Parse export text into a document
    pub fn parse(text: &str) -> Result<SessionDocument> {
        Self::parse_with_report(text).map(|(document, _)| document)
    }

    /// Parse export text, also reporting dropped lines
    pub fn parse_with_report(text: &str) -> Result<(SessionDocument, ParseReport)> {
        let normalized = text.replace("\r\n", "\n");

        let (preamble, table) = normalized.split_once(SECTION_SEPARATOR).ok_or_else(|| {
            CookVisError::MalformedDocument(
                "no blank line between the preamble and the table".to_string(),
            )
        })?;

        if preamble.is_empty() {
            return Err(CookVisError::MalformedDocument(
                "preamble section is empty".to_string(),
            ));
        }

        if table.is_empty() {
            return Err(CookVisError::MalformedDocument(
                "table section is empty".to_string(),
            ));
        }

        let mut lines = table.split('\n');
        let header_line = lines.next().unwrap_or_default();
        let mut headers: Vec<String> = header_line.split(',').map(str::to_string).collect();

        let mut report = ParseReport::default();
        if !headers.iter().any(|h| h == NOTES) {
            headers.push(NOTES.to_string());
            report.notes_column_added = true;
        }

        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            report.data_lines += 1;

            match decode_line(&headers, line) {
                Ok(row) => rows.push(row),
                Err(CookVisError::InvalidField { field, value }) => {
                    tracing::debug!(
                        "Dropping table line {}: invalid {} ({:?})",
                        index + 2,
                        field,
                        value
                    );
                    report.dropped.push(DroppedLine {
                        line: index + 2,
                        field,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if !report.dropped.is_empty() {
            tracing::warn!(
                "Dropped {} of {} data lines that failed to decode",
                report.dropped.len(),
                report.data_lines
            );
        }

        tracing::debug!(
            "Parsed {} rows across {} columns",
            rows.len(),
            headers.len()
        );

        let document = SessionDocument::from_parts(preamble.to_string(), headers, rows);
        Ok((document, report))
    }

    /// Serialize a document back to export text
    ///
    /// Columns follow the document's header order. Cells the row has no value
    /// for are written empty. Lines end with `\n` and the text has no trailing
    /// newline.
    pub fn serialize(document: &SessionDocument) -> String {
        let headers = document.column_headers();

        let mut out = String::with_capacity(64 * (document.len() + 1) + document.preamble().len());
        out.push_str(document.preamble());
        out.push_str(SECTION_SEPARATOR);
        out.push_str(&headers.join(","));

        for row in document.rows() {
            out.push('\n');
            out.push_str(&encode_row(headers, row));
        }

        out
    }
}

/// Zip one data line against the headers and decode it
///
/// Surplus cells are ignored and missing cells are absent. A repeated header
/// takes its value from its last position, and when that position is past the
/// end of the line the column counts as missing.
fn decode_line(headers: &[String], line: &str) -> Result<TimelineRow> {
    let cells: Vec<&str> = line.split(',').collect();

    let mut fields: HashMap<&str, &str> = HashMap::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        match cells.get(index) {
            Some(cell) => fields.insert(header.as_str(), *cell),
            None => fields.remove(header.as_str()),
        };
    }

    TimelineRow::decode(&fields)
}

fn encode_row(headers: &[String], row: &TimelineRow) -> String {
    headers
        .iter()
        .map(|header| row.field_value(header).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::row::COLUMN_HEADERS;
    use crate::types::PredictionState;

    const PREAMBLE: &str = "Combustion Inc. Probe Data\nProbe S/N: 10005205";

    fn data_line(seq: i64, timestamp: f64, state: &str) -> String {
        format!(
            "{},4F2A,{},20.5,21,22,23,24,25,26,27,40.25,30,22.5,41,63,T1,T4,T8,{},None,None,0",
            timestamp, seq, state
        )
    }

    fn export(line_ending: &str, with_notes: bool) -> String {
        let headers = if with_notes {
            COLUMN_HEADERS.join(",")
        } else {
            COLUMN_HEADERS[..23].join(",")
        };
        let mut lines = vec![
            PREAMBLE.replace('\n', line_ending),
            String::new(),
            headers,
        ];
        for seq in 0..4 {
            let mut line = data_line(seq, seq as f64 * 5.0, "Cooking");
            if with_notes {
                line.push(',');
                if seq == 2 {
                    line.push_str("Added butter");
                }
            }
            lines.push(line);
        }
        lines.join(line_ending)
    }

    #[test]
    fn test_parse_lf_export() {
        let document = CsvCodec::parse(&export("\n", true)).unwrap();

        assert_eq!(document.preamble(), PREAMBLE);
        assert_eq!(document.column_headers().len(), 24);
        assert_eq!(document.len(), 4);
        assert_eq!(document.rows()[2].note.as_deref(), Some("Added butter"));
        assert_eq!(document.rows()[3].timestamp, 15.0);
    }

    #[test]
    fn test_parse_crlf_export_matches_lf() {
        let lf = CsvCodec::parse(&export("\n", true)).unwrap();
        let crlf = CsvCodec::parse(&export("\r\n", true)).unwrap();
        assert_eq!(lf, crlf);
    }

    #[test]
    fn test_notes_column_is_appended() {
        let (document, report) = CsvCodec::parse_with_report(&export("\n", false)).unwrap();

        assert!(report.notes_column_added);
        assert_eq!(document.column_headers().last().map(String::as_str), Some(NOTES));
        assert_eq!(document.len(), 4);
        assert!(document.rows().iter().all(|r| r.note.is_none()));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let text = format!("{}\n{}", COLUMN_HEADERS.join(","), data_line(0, 0.0, "Cooking"));
        let err = CsvCodec::parse(&text).unwrap_err();
        assert!(err.is_malformed_document());

        assert!(CsvCodec::parse("").unwrap_err().is_malformed_document());
        assert!(CsvCodec::parse("preamble only\n\n")
            .unwrap_err()
            .is_malformed_document());
    }

    #[test]
    fn test_bad_row_is_dropped() {
        let mut text = export("\n", true);
        text.push('\n');
        text.push_str(&data_line(4, 20.0, "Cooking").replace("20.5", "n/a"));
        text.push('\n');
        text.push_str(&data_line(5, 25.0, "Probe Not Inserted"));

        let (document, report) = CsvCodec::parse_with_report(&text).unwrap();
        assert_eq!(report.data_lines, 6);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].field, "T1");
        assert_eq!(report.dropped[0].line, 6);
        assert_eq!(report.accepted(), 5);
        assert_eq!(document.len(), 5);
        assert_eq!(
            document.rows()[4].prediction_state,
            PredictionState::ProbeNotInserted
        );
    }

    #[test]
    fn test_trailing_newline_and_short_lines() {
        let mut text = export("\n", true);
        text.push_str("\n0,4F2A,9\n");

        let (document, report) = CsvCodec::parse_with_report(&text).unwrap();
        assert_eq!(document.len(), 4);
        assert_eq!(report.dropped.len(), 2);
    }

    #[test]
    fn test_surplus_cells_are_ignored() {
        let mut text = export("\n", false);
        text.push('\n');
        text.push_str(&data_line(4, 20.0, "Cooking"));
        text.push_str(",,surplus,cells");

        let document = CsvCodec::parse(&text).unwrap();
        assert_eq!(document.len(), 5);
        assert_eq!(document.rows()[4].note, None);
    }

    #[test]
    fn test_duplicate_header_last_write_wins() {
        let headers = format!("{},T1", COLUMN_HEADERS.join(","));
        let line = format!("{},,99.5", data_line(0, 0.0, "Cooking"));
        let text = format!("{}\n\n{}\n{}", PREAMBLE, headers, line);

        let document = CsvCodec::parse(&text).unwrap();
        assert_eq!(document.rows()[0].channels[0].celsius(), 99.5);

        let output = CsvCodec::serialize(&document);
        let written = output.lines().last().unwrap();
        assert_eq!(written.split(',').nth(3), Some("99.5"));
        assert_eq!(written.split(',').last(), Some("99.5"));
    }

    #[test]
    fn test_empty_preamble_is_malformed() {
        let text = format!("\n\n{}\n{}", COLUMN_HEADERS.join(","), data_line(0, 0.0, "Cooking"));
        let err = CsvCodec::parse(&text).unwrap_err();
        assert!(err.is_malformed_document());

        let crlf = text.replace('\n', "\r\n");
        assert!(CsvCodec::parse(&crlf).unwrap_err().is_malformed_document());
    }

    #[test]
    fn test_duplicate_header_past_end_of_line_is_missing() {
        // The repeated T1 sits after Notes, beyond the end of the line
        let headers = format!("{},T1", COLUMN_HEADERS.join(","));
        let short = format!("{},", data_line(0, 0.0, "Cooking"));
        let full = format!("{},,30.5", data_line(1, 5.0, "Cooking"));
        let text = format!("{}\n\n{}\n{}\n{}", PREAMBLE, headers, short, full);

        let (document, report) = CsvCodec::parse_with_report(&text).unwrap();
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].line, 2);
        assert_eq!(report.dropped[0].field, "T1");
        assert_eq!(document.len(), 1);
        assert_eq!(document.rows()[0].channels[0].celsius(), 30.5);
    }

    #[test]
    fn test_duplicate_notes_past_end_of_line_clears_note() {
        let headers = format!("{},{}", COLUMN_HEADERS.join(","), NOTES);
        let line = format!("{},Rested", data_line(0, 0.0, "Cooking"));
        let text = format!("{}\n\n{}\n{}", PREAMBLE, headers, line);

        let document = CsvCodec::parse(&text).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.rows()[0].note, None);
    }

    #[test]
    fn test_serialize_layout() {
        let document = CsvCodec::parse(&export("\r\n", false)).unwrap();
        let output = CsvCodec::serialize(&document);

        let expected_header = format!("{},{}", COLUMN_HEADERS[..23].join(","), NOTES);
        assert!(output.starts_with(&format!("{}\n\n{}\n", PREAMBLE, expected_header)));
        assert!(!output.ends_with('\n'));
        assert!(!output.contains('\r'));
        assert_eq!(output.lines().count(), 2 + 1 + 1 + 4);
        assert!(output.lines().last().unwrap().ends_with(",0,"));
    }

    #[test]
    fn test_round_trip_is_stable() {
        let document = CsvCodec::parse(&export("\n", true)).unwrap();
        let once = CsvCodec::serialize(&document);
        let reparsed = CsvCodec::parse(&once).unwrap();

        assert_eq!(reparsed, document);
        assert_eq!(CsvCodec::serialize(&reparsed), once);
    }

    use crate::types::{PredictionMode, PredictionType, Sensor, TemperatureValue};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn arb_f32() -> impl Strategy<Value = f32> {
        proptest::num::f32::NORMAL | proptest::num::f32::SUBNORMAL | proptest::num::f32::ZERO
    }

    fn arb_temperature() -> impl Strategy<Value = TemperatureValue> {
        arb_f32().prop_map(TemperatureValue::from_celsius)
    }

    fn arb_sensor() -> impl Strategy<Value = Sensor> {
        proptest::sample::select(Sensor::all())
    }

    fn arb_row() -> impl Strategy<Value = TimelineRow> {
        let identity = (
            proptest::num::f64::NORMAL | proptest::num::f64::ZERO,
            "[A-Z0-9]{0,8}",
            any::<i64>(),
            proptest::array::uniform8(arb_temperature()),
        );
        let readings = (
            arb_temperature(),
            arb_temperature(),
            arb_temperature(),
            arb_temperature(),
            arb_f32(),
        );
        let prediction = (
            arb_sensor(),
            arb_sensor(),
            arb_sensor(),
            proptest::sample::select(PredictionState::all()),
            proptest::sample::select(vec![PredictionMode::None, PredictionMode::TimeToRemoval]),
            proptest::sample::select(vec![PredictionType::None, PredictionType::Removal]),
            any::<i64>(),
        );
        let note = proptest::option::of("[A-Za-z0-9 .!()-]{1,24}");

        (identity, readings, prediction, note).prop_map(
            |(
                (timestamp, session_id, sequence_number, channels),
                (virtual_core, virtual_surface, virtual_ambient, estimated_core, set_point),
                (core_sensor, surface_sensor, ambient_sensor, state, mode, kind, seconds),
                note,
            )| TimelineRow {
                timestamp,
                session_id,
                sequence_number,
                channels,
                virtual_core,
                virtual_surface,
                virtual_ambient,
                estimated_core,
                prediction_set_point: set_point,
                virtual_core_sensor: core_sensor,
                virtual_surface_sensor: surface_sensor,
                virtual_ambient_sensor: ambient_sensor,
                prediction_state: state,
                prediction_mode: mode,
                prediction_type: kind,
                prediction_value_seconds: seconds,
                note,
                extra: BTreeMap::new(),
            },
        )
    }

    fn arb_document() -> impl Strategy<Value = SessionDocument> {
        (
            "[A-Za-z0-9 .:/]{1,30}(\n[A-Za-z0-9 .:/]{1,30}){0,3}",
            any::<bool>(),
            proptest::collection::vec(arb_row(), 0..24),
        )
            .prop_map(|(preamble, with_notes, rows)| {
                let columns = if with_notes {
                    &COLUMN_HEADERS[..]
                } else {
                    &COLUMN_HEADERS[..COLUMN_HEADERS.len() - 1]
                };
                let headers = columns.iter().map(|h| h.to_string()).collect();
                SessionDocument::from_parts(preamble, headers, rows)
            })
    }

    proptest! {
        #[test]
        fn test_generated_documents_round_trip(document in arb_document()) {
            let once = CsvCodec::serialize(&document);
            let reparsed = CsvCodec::parse(&once).unwrap();

            prop_assert_eq!(&reparsed, &document);
            prop_assert_eq!(CsvCodec::serialize(&reparsed), once);
        }
    }
}
