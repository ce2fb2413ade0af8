//! Exports stored on the local filesystem

use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};
use crate::timeline::SessionDocument;

use super::CookFile;

/// A cook export read from a path
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    document: SessionDocument,
}

impl LocalFile {
    /// Read and parse the file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let document = SessionDocument::parse(&text)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        tracing::info!("Opened {} ({} rows)", path.display(), document.len());
        Ok(Self { path, document })
    }

    /// Wrap an already-parsed document that will be saved to `path`
    pub fn new(path: impl Into<PathBuf>, document: SessionDocument) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document to another path without changing where it saves
    pub fn export_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.document.to_csv())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported {} rows to {}", self.document.len(), path.display());
        Ok(())
    }
}

impl CookFile for LocalFile {
    fn window_title(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn document(&self) -> &SessionDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut SessionDocument {
        &mut self.document
    }

    fn save(&mut self) -> Result<()> {
        std::fs::write(&self.path, self.document.to_csv())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.document.mark_saved();
        tracing::info!("Saved {} rows to {}", self.document.len(), self.path.display());
        Ok(())
    }
}
