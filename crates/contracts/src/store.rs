//! ProjectStore trait - persistence backend interface
//!
//! Defines the abstract interface for project-record stores.

use crate::{ProjectRecord, ReviewError};

/// Project persistence trait
///
/// All store implementations must implement this trait.
#[trait_variant::make(ProjectStore: Send)]
pub trait LocalProjectStore {
    /// Store name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Persist a record under the given media key, replacing any previous one
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn save(&mut self, key: &str, record: &ProjectRecord) -> Result<(), ReviewError>;

    /// Load the record for a media key, `None` when no record exists
    async fn load(&mut self, key: &str) -> Result<Option<ProjectRecord>, ReviewError>;

    /// Close the store
    async fn close(&mut self) -> Result<(), ReviewError>;
}
