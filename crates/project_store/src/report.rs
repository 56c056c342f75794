//! Plain-text report export.
//!
//! A report lists the total duration and every annotation with its clock
//! time, label, category and notes, written to a user-chosen filename.

use std::fs;
use std::path::Path;

use contracts::{format_clock, format_secs, ReviewError};
use tracing::info;

use crate::annotations::AnnotationLog;

/// Render the report document.
pub fn render_report(title: &str, total_duration: f64, log: &AnnotationLog) -> String {
    let mut out = String::new();
    out.push_str(&format!("Session report: {title}\n"));
    out.push_str(&format!(
        "Total duration: {} ({} s)\n",
        format_clock(total_duration),
        format_secs(total_duration)
    ));
    out.push_str(&format!("Annotations: {}\n\n", log.len()));

    for (idx, note) in log.entries().iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}] {} ({})\n",
            idx + 1,
            format_clock(note.time),
            note.label,
            note.category
        ));
        if !note.notes.is_empty() {
            out.push_str(&format!("   {}\n", note.notes));
        }
    }

    out
}

/// Render and write the report to `path`.
pub fn write_report(
    path: &Path,
    title: &str,
    total_duration: f64,
    log: &AnnotationLog,
) -> Result<(), ReviewError> {
    let content = render_report(title, total_duration, log);
    fs::write(path, content)
        .map_err(|e| ReviewError::report_write(path.display().to_string(), e.to_string()))?;
    info!(path = %path.display(), annotations = log.len(), "report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::TimestepNote;
    use tempfile::tempdir;

    fn log() -> AnnotationLog {
        let mut log = AnnotationLog::new();
        log.append(TimestepNote {
            time: 75.0,
            label: "heel strike".into(),
            category: "gait".into(),
            notes: "left side".into(),
        });
        log.append(TimestepNote {
            time: 80.5,
            label: "toe off".into(),
            category: "gait".into(),
            notes: String::new(),
        });
        log
    }

    #[test]
    fn test_render_report() {
        let report = render_report("session1.mp4", 180.0, &log());
        assert!(report.contains("Session report: session1.mp4"));
        assert!(report.contains("Total duration: 03:00 (180.000 s)"));
        assert!(report.contains("Annotations: 2"));
        assert!(report.contains("1. [01:15] heel strike (gait)"));
        assert!(report.contains("   left side"));
        assert!(report.contains("2. [01:20] toe off (gait)"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, "clip", 10.0, &log()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total duration"));
    }

    #[test]
    fn test_write_report_bad_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.txt");
        let err = write_report(&path, "clip", 10.0, &AnnotationLog::new()).unwrap_err();
        assert!(matches!(err, ReviewError::ReportWrite { .. }));
    }
}
