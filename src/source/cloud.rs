//! Exports stored in cloud storage
//!
//! Storage and authentication live outside this crate. A [`CloudTransport`]
//! moves opaque CSV text to and from the object addressed by a
//! [`CloudRecord`]; [`CloudFile`] owns the parsed document in between.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{CookVisError, Result, ResultExt};
use crate::timeline::SessionDocument;

use super::CookFile;

/// Largest export accepted from cloud storage (2 MiB)
pub const MAX_CLOUD_FILE_SIZE: usize = 2 * 1024 * 1024;

/// Metadata describing an uploaded cook
///
/// Serialized with camelCase keys. `filePath` is written for consumers of the
/// JSON but derived from `user_id` and `uuid` when read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRecord {
    pub uuid: Uuid,
    pub title: String,
    pub cooking_method: String,
    pub cook_details: String,
    pub share_with_combustion: bool,
    pub user_id: String,
    pub file_name: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for CloudRecord {
    fn default() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: String::new(),
            cooking_method: String::new(),
            cook_details: String::new(),
            share_with_combustion: true,
            user_id: String::new(),
            file_name: String::new(),
            updated_at: Utc::now(),
        }
    }
}

impl CloudRecord {
    /// New record with a fresh id for the given owner
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Object path of the CSV payload in storage
    pub fn file_path(&self) -> String {
        format!("cooks/uploads/{}/{}/data.csv", self.user_id, self.uuid)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Serialize for CloudRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CloudRecord", 9)?;
        state.serialize_field("uuid", &self.uuid)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("cookingMethod", &self.cooking_method)?;
        state.serialize_field("cookDetails", &self.cook_details)?;
        state.serialize_field("shareWithCombustion", &self.share_with_combustion)?;
        state.serialize_field("userId", &self.user_id)?;
        state.serialize_field("fileName", &self.file_name)?;
        state.serialize_field("filePath", &self.file_path())?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.end()
    }
}

/// Moves export text to and from cloud storage
#[cfg_attr(test, mockall::automock)]
pub trait CloudTransport {
    /// Fetch the CSV payload stored for `record`
    fn download(&self, record: &CloudRecord) -> Result<String>;

    /// Store `csv` as the payload for `record`
    fn upload(&self, record: &CloudRecord, csv: &str) -> Result<()>;
}

/// A cook export backed by cloud storage
pub struct CloudFile<'t> {
    record: CloudRecord,
    document: SessionDocument,
    transport: &'t dyn CloudTransport,
}

impl std::fmt::Debug for CloudFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudFile")
            .field("record", &self.record)
            .field("rows", &self.document.len())
            .finish()
    }
}

impl<'t> CloudFile<'t> {
    /// Download and parse the export for `record`
    pub fn open(record: CloudRecord, transport: &'t dyn CloudTransport) -> Result<Self> {
        let csv = transport
            .download(&record)
            .with_context(|| format!("Failed to download {}", record.file_path()))?;

        if csv.len() > MAX_CLOUD_FILE_SIZE {
            return Err(CookVisError::FileTooLarge {
                size: csv.len(),
                max: MAX_CLOUD_FILE_SIZE,
            });
        }

        let document = SessionDocument::parse(&csv)
            .with_context(|| format!("Failed to load {}", record.file_path()))?;

        tracing::info!(
            "Opened cloud cook {:?} ({} rows)",
            record.title,
            document.len()
        );
        Ok(Self {
            record,
            document,
            transport,
        })
    }

    pub fn record(&self) -> &CloudRecord {
        &self.record
    }
}

impl CookFile for CloudFile<'_> {
    fn window_title(&self) -> String {
        self.record.title.clone()
    }

    fn document(&self) -> &SessionDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut SessionDocument {
        &mut self.document
    }

    fn save(&mut self) -> Result<()> {
        self.transport
            .upload(&self.record, &self.document.to_csv())
            .with_context(|| format!("Failed to upload {}", self.record.file_path()))?;

        self.record.updated_at = Utc::now();
        self.document.mark_saved();
        tracing::info!(
            "Uploaded {} rows to {}",
            self.document.len(),
            self.record.file_path()
        );
        Ok(())
    }
}
