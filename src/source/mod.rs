//! Where a session document comes from
//!
//! A loaded export is either a file on disk ([`LocalFile`]) or a record in
//! cloud storage ([`CloudFile`]). Both hold a [`SessionDocument`] and differ
//! only in how they are titled and written back, which [`CookFile`] captures.

pub mod cloud;
pub mod local;

pub use cloud::{CloudFile, CloudRecord, CloudTransport, MAX_CLOUD_FILE_SIZE};
pub use local::LocalFile;

use crate::error::Result;
use crate::timeline::SessionDocument;

/// An opened cook export
pub trait CookFile {
    /// Title shown for the open document
    fn window_title(&self) -> String;

    /// The parsed document
    fn document(&self) -> &SessionDocument;

    /// The parsed document, for annotation edits
    fn document_mut(&mut self) -> &mut SessionDocument;

    /// Write the document back to where it came from
    fn save(&mut self) -> Result<()>;

    /// Save only if there are unsaved edits; returns whether a save happened
    fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.document().is_dirty() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}
