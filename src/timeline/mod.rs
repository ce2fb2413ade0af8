//! Cook timeline model and CSV codec
//!
//! This module turns a device export into a typed [`SessionDocument`] and
//! back again.
//!
//! # Features
//!
//! - Accepts `\n` and `\r\n` exports
//! - Tolerates corrupt data lines by dropping them
//! - Always provides a `Notes` column for annotations
//! - Writes columns back in their original order

pub mod codec;
pub mod document;
pub mod row;

pub use codec::{CsvCodec, DroppedLine, ParseReport};
pub use document::{SessionDocument, SessionSummary};
pub use row::{TimelineRow, COLUMN_HEADERS};
