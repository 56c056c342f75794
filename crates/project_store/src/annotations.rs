//! Annotation log.
//!
//! An ordered, user-visible list of timestep notes. Independent of the
//! sync offset: annotations survive re-synchronization unchanged.

use contracts::TimestepNote;
use tracing::debug;

/// Ordered annotation list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationLog {
    entries: Vec<TimestepNote>,
}

impl AnnotationLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from a persisted record's list.
    pub fn from_entries(entries: Vec<TimestepNote>) -> Self {
        Self { entries }
    }

    /// Append one annotation to the end of the list.
    pub fn append(&mut self, note: TimestepNote) {
        debug!(time = note.time, label = %note.label, "annotation appended");
        self.entries.push(note);
    }

    /// Delete the annotation at `index`; returns it, or `None` when the
    /// index is out of range (no-op).
    pub fn delete(&mut self, index: usize) -> Option<TimestepNote> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Annotations in insertion order.
    pub fn entries(&self) -> &[TimestepNote] {
        &self.entries
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clone the list out for persistence.
    pub fn to_entries(&self) -> Vec<TimestepNote> {
        self.entries.clone()
    }

    /// Drop all annotations.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(time: f64, label: &str) -> TimestepNote {
        TimestepNote {
            time,
            label: label.to_string(),
            category: "gait".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = AnnotationLog::new();
        log.append(note(2.0, "b"));
        log.append(note(1.0, "a"));
        assert_eq!(log.len(), 2);
        // Insertion order, not time order
        assert_eq!(log.entries()[0].label, "b");
    }

    #[test]
    fn test_delete_by_index() {
        let mut log = AnnotationLog::new();
        log.append(note(1.0, "a"));
        log.append(note(2.0, "b"));

        let removed = log.delete(0).unwrap();
        assert_eq!(removed.label, "a");
        assert_eq!(log.entries()[0].label, "b");
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut log = AnnotationLog::new();
        log.append(note(1.0, "a"));
        assert!(log.delete(5).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_round_trip_entries() {
        let mut log = AnnotationLog::new();
        log.append(note(1.0, "a"));
        let restored = AnnotationLog::from_entries(log.to_entries());
        assert_eq!(restored, log);
    }
}
