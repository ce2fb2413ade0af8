//! Integration tests for loading, annotating and saving cook exports

mod common;

use common::builders::{ExportBuilder, LineBuilder};
use cookvis_rs::timeline::COLUMN_HEADERS;
use cookvis_rs::{CookVisError, CsvCodec, PredictionState, SessionDocument};

#[test]
fn test_saved_export_round_trips_byte_for_byte() {
    let text = ExportBuilder::new()
        .with_notes_column()
        .line(LineBuilder::new(0))
        .line(LineBuilder::new(1).note("Lid closed"))
        .line(LineBuilder::new(2).state("Probe Not Inserted"))
        .build();

    let doc = SessionDocument::parse(&text).unwrap();
    assert_eq!(doc.to_csv(), text);
}

#[test]
fn test_fresh_device_export_gains_notes_column() {
    let text = ExportBuilder::new().rows(0, 3).build();
    let doc = SessionDocument::parse(&text).unwrap();

    assert_eq!(doc.column_headers().len(), COLUMN_HEADERS.len());
    assert_eq!(doc.column_headers().last().map(String::as_str), Some("Notes"));

    let out = doc.to_csv();
    let reparsed = SessionDocument::parse(&out).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(
        reparsed.column_headers().iter().filter(|h| *h == "Notes").count(),
        1
    );
}

#[test]
fn test_crlf_and_lf_parse_identically() {
    let lf = ExportBuilder::new().rows(0, 5).build();
    let crlf = ExportBuilder::new().rows(0, 5).crlf().build();
    assert!(crlf.contains("\r\n"));

    let from_lf = SessionDocument::parse(&lf).unwrap();
    let from_crlf = SessionDocument::parse(&crlf).unwrap();
    assert_eq!(from_lf, from_crlf);
    assert!(!from_crlf.to_csv().contains('\r'));
}

#[test]
fn test_annotation_survives_save_and_reload() {
    let text = ExportBuilder::new().rows(0, 10).build();
    let mut doc = SessionDocument::parse(&text).unwrap();

    assert!(doc.add_or_update_note(7, "Spritzed with apple juice"));
    let reloaded = SessionDocument::parse(&doc.to_csv()).unwrap();

    let annotations = reloaded.annotations();
    assert_eq!(annotations.len(), 1);
    let note = annotations.find(7).unwrap();
    assert_eq!(note.text(), "Spritzed with apple juice");
    assert_eq!(note.timestamp(), 35.0);
}

#[test]
fn test_note_with_comma_does_not_shift_columns() {
    let text = ExportBuilder::new().rows(0, 3).build();
    let mut doc = SessionDocument::parse(&text).unwrap();

    doc.add_or_update_note(1, "salt, pepper");
    let reloaded = SessionDocument::parse(&doc.to_csv()).unwrap();

    assert_eq!(reloaded.len(), 3);
    assert_eq!(
        reloaded.row(1).and_then(|r| r.note.as_deref()),
        Some("salt  pepper")
    );
}

#[test]
fn test_removed_note_is_gone_after_reload() {
    let text = ExportBuilder::new()
        .with_notes_column()
        .line(LineBuilder::new(0).note("Start"))
        .line(LineBuilder::new(1).note("Flip"))
        .build();
    let mut doc = SessionDocument::parse(&text).unwrap();

    assert!(doc.remove_note(0));
    let reloaded = SessionDocument::parse(&doc.to_csv()).unwrap();
    let seqs: Vec<_> = reloaded
        .annotations()
        .iter()
        .map(|a| a.sequence_number())
        .collect();
    assert_eq!(seqs, vec![1]);
}

#[test]
fn test_corrupt_lines_are_dropped_not_fatal() {
    let text = ExportBuilder::new()
        .rows(0, 2)
        .raw_line("garbage")
        .raw_line("10.0,8C3E,2,not-a-number,20,21,22,23,24,25,26,20,30,110,20,63,T1,T4,T8,Cooking,None,None,0")
        .rows(3, 2)
        .build();

    let (doc, report) = CsvCodec::parse_with_report(&text).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(report.data_lines, 6);
    assert_eq!(report.accepted(), 4);
    assert_eq!(report.dropped.len(), 2);
    assert_eq!(report.dropped[0].line, 4);
    assert_eq!(report.dropped[1].field, "T1");
    assert!(report.notes_column_added);
}

#[test]
fn test_unknown_state_drops_row() {
    let text = ExportBuilder::new()
        .line(LineBuilder::new(0))
        .line(LineBuilder::new(1).state("Overcooked"))
        .build();

    let doc = SessionDocument::parse(&text).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.rows()[0].prediction_state, PredictionState::Cooking);
}

#[test]
fn test_missing_separator_is_malformed() {
    let text = COLUMN_HEADERS.join(",");
    let err = SessionDocument::parse(&text).unwrap_err();
    assert!(matches!(err, CookVisError::MalformedDocument(_)));
}

#[test]
fn test_header_only_export_is_empty_document() {
    let text = ExportBuilder::new().build();
    let doc = SessionDocument::parse(&text).unwrap();

    assert!(doc.is_empty());
    assert!(doc.annotations().is_empty());
    assert!(doc.probe_not_inserted_ranges().is_empty());
}

#[test]
fn test_extra_columns_pass_through() {
    let mut headers = COLUMN_HEADERS.to_vec();
    headers.insert(3, "BatteryLevel");
    let text = format!(
        "Probe Data\n\n{}\n0.0,8C3E,0,97,20,20,20,20,20,20,20,20,20,20,20,20,63,T1,T4,T8,Cooking,None,None,0,",
        headers.join(",")
    );

    let doc = SessionDocument::parse(&text).unwrap();
    assert_eq!(doc.rows()[0].extra.get("BatteryLevel").map(String::as_str), Some("97"));

    let out = doc.to_csv();
    let data_line = out.lines().last().unwrap();
    assert!(data_line.starts_with("0.0,8C3E,0,97,20.0,"));
}
