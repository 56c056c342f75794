//! ProjectRecord - persisted review-session state
//!
//! What survives across sessions: the sync offset, the annotation list, the
//! sample rate and free-form notes. Loading a record restores the offset and
//! annotations but never moves either playhead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestep annotation placed by the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepNote {
    /// Timeline position (seconds)
    pub time: f64,

    /// Short label, e.g. "heel strike"
    pub label: String,

    /// Category bucket, e.g. "gait"
    pub category: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Serialized review-session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Sync offset at save time (`data_time = video_time - offset`)
    pub sync_offset: f64,

    /// Ordered annotation list
    pub timestamps: Vec<TimestepNote>,

    /// Sample rate the dataset was parsed at (Hz)
    pub sample_rate: f64,

    /// Free-form session notes
    #[serde(default)]
    pub notes: String,

    /// Record creation time (UTC)
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Build a record stamped with the current time.
    pub fn new(sync_offset: f64, timestamps: Vec<TimestepNote>, sample_rate: f64) -> Self {
        Self {
            sync_offset,
            timestamps,
            sample_rate,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Storage key for a project record: derived from the loaded media file's
/// name and size, so the same clip re-opened later finds its record.
pub fn project_key(media_name: &str, media_size: u64) -> String {
    // Path separators in the media name would escape the store directory.
    let safe: String = media_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}-{media_size}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_key() {
        assert_eq!(project_key("session1.mp4", 10240), "session1.mp4-10240");
        assert_eq!(project_key("a/b.mp4", 1), "a_b.mp4-1");
    }

    #[test]
    fn test_record_round_trip() {
        let record = ProjectRecord {
            sync_offset: -1.3,
            timestamps: vec![TimestepNote {
                time: 2.5,
                label: "heel strike".into(),
                category: "gait".into(),
                notes: String::new(),
            }],
            sample_rate: 104.0,
            notes: "first pass".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ProjectRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
