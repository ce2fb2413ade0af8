//! Analysis over timeline rows
//!
//! Everything here is derived from the rows and recomputed on demand:
//! - Annotation index (rows carrying a note)
//! - Probe-not-inserted interval detection
//! - Render sampling (decimation, grid lookup, curve series)

pub mod annotations;
pub mod probe_ranges;
pub mod sampler;

pub use annotations::{Annotation, AnnotationIndex};
pub use probe_ranges::{ProbeNotInsertedRange, ProbeRangeAnalyzer};
pub use sampler::{RenderSampler, TIMELINE_GRID_SECONDS};
