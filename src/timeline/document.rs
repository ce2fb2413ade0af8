//! Session documents
//!
//! A [`SessionDocument`] is one loaded export: the preamble text, the column
//! headers in file order, and the rows in file order. It is the unit of load
//! and save, and the only thing annotation edits operate on.

use serde::Serialize;

use crate::analysis::{AnnotationIndex, ProbeNotInsertedRange, ProbeRangeAnalyzer};
use crate::error::Result;
use crate::types::TemperatureValue;

use super::codec::CsvCodec;
use super::row::{TimelineRow, NOTES};

/// A parsed cook export
#[derive(Debug, Clone, Default)]
pub struct SessionDocument {
    preamble: String,
    headers: Vec<String>,
    rows: Vec<TimelineRow>,
    /// Bumped on every change to a row
    revision: u64,
    /// Revision at the last save (or load)
    saved_revision: u64,
}

impl PartialEq for SessionDocument {
    fn eq(&self, other: &Self) -> bool {
        self.preamble == other.preamble && self.headers == other.headers && self.rows == other.rows
    }
}

impl SessionDocument {
    /// Assemble a document, appending a `Notes` column when missing
    pub fn from_parts(preamble: String, mut headers: Vec<String>, rows: Vec<TimelineRow>) -> Self {
        if !headers.iter().any(|h| h == NOTES) {
            headers.push(NOTES.to_string());
        }

        Self {
            preamble,
            headers,
            rows,
            revision: 0,
            saved_revision: 0,
        }
    }

    /// Parse export text
    pub fn parse(text: &str) -> Result<Self> {
        CsvCodec::parse(text)
    }

    /// Serialize to export text
    pub fn to_csv(&self) -> String {
        CsvCodec::serialize(self)
    }

    /// Free-text block preceding the table
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Column headers in file order
    pub fn column_headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in file order
    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a row by sequence number
    pub fn row(&self, sequence_number: i64) -> Option<&TimelineRow> {
        self.rows
            .iter()
            .find(|r| r.sequence_number == sequence_number)
    }

    fn position(&self, sequence_number: i64) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.sequence_number == sequence_number)
    }

    /// Attach or replace the note on a row
    ///
    /// Missing sequence numbers are ignored. Returns whether the row changed.
    ///
    /// The stored note is not always `text` verbatim: every comma, `\r` and
    /// `\n` is replaced with a space (a `\r\n` pair becomes one space), since
    /// export cells are unquoted and would otherwise split the row. Read the
    /// row back to see the stored text. Empty text clears the note.
    pub fn add_or_update_note(&mut self, sequence_number: i64, text: &str) -> bool {
        let note = sanitize_note(text);
        self.replace_note(sequence_number, Some(note))
    }

    /// Clear the note on a row; missing sequence numbers are ignored
    pub fn remove_note(&mut self, sequence_number: i64) -> bool {
        self.replace_note(sequence_number, None)
    }

    fn replace_note(&mut self, sequence_number: i64, note: Option<String>) -> bool {
        let Some(index) = self.position(sequence_number) else {
            tracing::debug!("No row with sequence number {}, note unchanged", sequence_number);
            return false;
        };

        let mut row = self.rows[index].clone();
        row.set_note(note);
        if row == self.rows[index] {
            return false;
        }

        self.rows[index] = row;
        self.revision += 1;
        tracing::debug!(
            "Updated note on row {} (revision {})",
            sequence_number,
            self.revision
        );
        true
    }

    /// Rows carrying a note
    pub fn annotations(&self) -> AnnotationIndex<'_> {
        AnnotationIndex::new(&self.rows)
    }

    /// Intervals during which the probe was out of the food
    pub fn probe_not_inserted_ranges(&self) -> Vec<ProbeNotInsertedRange> {
        ProbeRangeAnalyzer::analyze(&self.rows)
    }

    /// Number of row changes since the document was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check if there are changes since the last save
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Record that the current revision has been written out
    pub fn mark_saved(&mut self) {
        self.saved_revision = self.revision;
    }

    /// Headline figures for the session
    pub fn summary(&self) -> SessionSummary {
        let first = self.rows.first();
        let last = self.rows.last();

        SessionSummary {
            rows: self.rows.len(),
            session_id: first.map(|r| r.session_id.clone()),
            duration_seconds: match (first, last) {
                (Some(first), Some(last)) => last.timestamp - first.timestamp,
                _ => 0.0,
            },
            notes: self.annotations().len(),
            probe_not_inserted_ranges: self.probe_not_inserted_ranges().len(),
            peak_core: self
                .rows
                .iter()
                .map(|r| r.virtual_core)
                .reduce(|a, b| if b.celsius() > a.celsius() { b } else { a }),
        }
    }
}

/// Headline figures for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rows: usize,
    pub session_id: Option<String>,
    /// Time between the first and last row
    pub duration_seconds: f64,
    pub notes: usize,
    pub probe_not_inserted_ranges: usize,
    /// Highest virtual core reading
    pub peak_core: Option<TemperatureValue>,
}

fn sanitize_note(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace([',', '\n', '\r'], " ")
}
