//! # Project Store
//!
//! Review-session persistence and export.
//!
//! Responsibilities:
//! - Keep the ordered annotation list (timestep notes)
//! - Persist/load `ProjectRecord`s keyed by media file name+size
//! - Export the plain-text session report
//!
//! Loading a persisted project restores the sync offset and the annotation
//! list; it never re-synchronizes either timeline's playhead.

mod annotations;
mod file_store;
mod report;

// Re-exports
pub use annotations::AnnotationLog;
pub use contracts::{project_key, ProjectRecord, ProjectStore, TimestepNote};
pub use file_store::FileProjectStore;
pub use report::{render_report, write_report};
