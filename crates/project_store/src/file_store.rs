//! FileProjectStore - project records on disk
//!
//! One JSON file per media key under a base directory:
//! `<base>/<media-name>-<media-size>.project.json`.

use std::fs::{self, File};
use std::path::PathBuf;

use contracts::{ProjectRecord, ProjectStore, ReviewError};
use tracing::{debug, info, instrument};

/// Filesystem-backed project store.
pub struct FileProjectStore {
    name: String,
    base_path: PathBuf,
}

impl FileProjectStore {
    /// Open (creating if needed) a store rooted at `base_path`.
    pub fn new(name: impl Into<String>, base_path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            name: name.into(),
            base_path,
        })
    }

    /// Path of the record file for a media key.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.project.json"))
    }

    fn write_record(&self, key: &str, record: &ProjectRecord) -> Result<(), ReviewError> {
        let path = self.record_path(key);
        let file = File::create(&path)
            .map_err(|e| ReviewError::store_write(&self.name, e.to_string()))?;
        serde_json::to_writer_pretty(file, record)
            .map_err(|e| ReviewError::store_write(&self.name, e.to_string()))?;
        debug!(store = %self.name, path = %path.display(), "project record written");
        Ok(())
    }

    fn read_record(&self, key: &str) -> Result<Option<ProjectRecord>, ReviewError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&content)
            .map_err(|e| ReviewError::record_decode(key, e.to_string()))?;
        Ok(Some(record))
    }
}

impl ProjectStore for FileProjectStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_store_save",
        skip(self, record),
        fields(store = %self.name, key = %key)
    )]
    async fn save(&mut self, key: &str, record: &ProjectRecord) -> Result<(), ReviewError> {
        self.write_record(key, record)
    }

    #[instrument(name = "file_store_load", skip(self), fields(store = %self.name, key = %key))]
    async fn load(&mut self, key: &str) -> Result<Option<ProjectRecord>, ReviewError> {
        self.read_record(key)
    }

    #[instrument(name = "file_store_close", skip(self))]
    async fn close(&mut self) -> Result<(), ReviewError> {
        info!(store = %self.name, "project store closed");
        Ok(())
    }
}
