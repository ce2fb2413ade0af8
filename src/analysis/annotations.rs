//! Annotation view over a timeline
//!
//! Notes live on the rows themselves. [`AnnotationIndex`] is a read-only
//! filter over the rows whose note is non-empty, in row order.

use crate::timeline::TimelineRow;
use crate::types::format_elapsed;

/// A row that carries a note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation<'a> {
    row: &'a TimelineRow,
}

impl<'a> Annotation<'a> {
    pub fn sequence_number(&self) -> i64 {
        self.row.sequence_number
    }

    pub fn timestamp(&self) -> f64 {
        self.row.timestamp
    }

    /// Note text, never empty
    pub fn text(&self) -> &'a str {
        self.row.note.as_deref().unwrap_or_default()
    }

    /// Elapsed-time label such as `"01h 20m"`
    pub fn time_label(&self) -> String {
        format_elapsed(self.row.timestamp)
    }

    /// The annotated row
    pub fn row(&self) -> &'a TimelineRow {
        self.row
    }
}

/// Rows with a non-empty note
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex<'a> {
    rows: Vec<&'a TimelineRow>,
}

impl<'a> AnnotationIndex<'a> {
    /// Build the index from the full row set
    pub fn new(rows: &'a [TimelineRow]) -> Self {
        Self {
            rows: rows.iter().filter(|r| r.has_note()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Annotations in row order
    pub fn iter(&self) -> impl Iterator<Item = Annotation<'a>> + '_ {
        self.rows.iter().map(|&row| Annotation { row })
    }

    /// Annotation on a specific row, if that row has one
    pub fn find(&self, sequence_number: i64) -> Option<Annotation<'a>> {
        self.rows
            .iter()
            .find(|r| r.sequence_number == sequence_number)
            .copied()
            .map(|row| Annotation { row })
    }
}
