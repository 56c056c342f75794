//! Replay statistics.

use std::time::Duration;

use observability::{RunningStats, SessionSummary};

/// Statistics from one headless replay
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// Dataset rows loaded
    pub rows_loaded: usize,

    /// Cells coerced to zero during the load
    pub cells_coerced: u64,

    /// Render-loop ticks processed
    pub ticks: u64,

    /// Chart renders performed
    pub renders: u64,

    /// Pose frames estimated (simulation only)
    pub pose_frames: u64,

    /// Pose mean-score statistics (simulation only)
    pub pose_score: RunningStats,

    /// Sync offset in effect at the end of the run
    pub sync_offset: f64,

    /// Data playhead at the end of the run (seconds)
    pub end_time: f64,

    /// Wall-clock duration of the replay
    pub duration: Duration,

    /// Aggregated render/scrub metrics
    pub summary: SessionSummary,
}

impl ReplayStats {
    /// Ticks per wall-clock second
    pub fn tick_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Replay Summary ===\n");

        println!("Dataset");
        println!("   ├─ Rows: {}", self.rows_loaded);
        println!("   └─ Coerced cells: {}", self.cells_coerced);

        println!("Playback");
        println!("   ├─ Wall clock: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Ticks: {} ({:.1}/s)", self.ticks, self.tick_rate());
        println!("   ├─ Renders: {}", self.renders);
        println!("   ├─ Final playhead: {:.3}s", self.end_time);
        println!("   └─ Sync offset: {:.3}s", self.sync_offset);

        if self.pose_frames > 0 {
            println!("Pose simulation");
            println!("   ├─ Frames with a result: {}", self.pose_frames);
            println!(
                "   └─ Mean score: {:.3} (min {:.3}, max {:.3})",
                self.pose_score.mean(),
                self.pose_score.min(),
                self.pose_score.max()
            );
        }

        println!("\n{}", self.summary);
    }
}
