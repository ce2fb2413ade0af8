//! # CookVis-RS: Cook timeline analyser
//!
//! Loads the CSV exports written by wireless temperature probes, lets a user
//! attach notes to individual samples, and derives the data a chart needs:
//! note markers, the intervals where the probe was out of the food, and a
//! thinned-out view of the rows for drawing.
//!
//! ## Architecture
//!
//! - **Timeline**: [`TimelineRow`] records, the [`CsvCodec`] and the
//!   [`SessionDocument`] that annotation edits operate on
//! - **Analysis**: annotation index, probe-removal ranges and render sampling
//! - **Source**: local and cloud-backed documents behind the [`CookFile`] trait
//! - **Config**: viewer preferences, persisted as TOML
//!
//! ## Configuration
//!
//! Viewer settings are stored in the platform-appropriate data directory
//! under `dev.cookvis.cookvis-rs`:
//!
//! - **Linux**: `~/.local/share/dev.cookvis.cookvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.cookvis.cookvis-rs/`
//! - **Windows**: `%APPDATA%\dev.cookvis.cookvis-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use cookvis_rs::{CookFile, LocalFile, RenderSampler, ViewerSettings};
//!
//! fn main() -> cookvis_rs::Result<()> {
//!     let settings = ViewerSettings::load_or_default();
//!     let mut file = LocalFile::open("brisket.csv")?;
//!
//!     file.document_mut().add_or_update_note(120, "Wrapped in butcher paper");
//!     for range in file.document().probe_not_inserted_ranges() {
//!         println!("probe out {}s .. {}s", range.lower, range.upper);
//!     }
//!
//!     let points = RenderSampler::display_rows(file.document().rows(), &settings);
//!     println!("{} points to draw", points.len());
//!
//!     file.save_if_dirty()?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod timeline;
pub mod types;

// Re-export commonly used types
pub use analysis::{AnnotationIndex, ProbeNotInsertedRange, ProbeRangeAnalyzer, RenderSampler};
pub use config::ViewerSettings;
pub use error::{CookVisError, Result};
pub use source::{CloudFile, CloudRecord, CloudTransport, CookFile, LocalFile};
pub use timeline::{CsvCodec, SessionDocument, TimelineRow};
pub use types::{Curve, PredictionState, Sensor, TemperatureUnit, TemperatureValue};
