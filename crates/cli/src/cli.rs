//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Motion Review - video/IMU time-synchronization and playback engine
#[derive(Parser, Debug)]
#[command(
    name = "motion-review",
    author,
    version,
    about = "Video/IMU review session engine",
    long_about = "Headless driver for the video/IMU review engine.\n\n\
                  Loads an IMU dataset, establishes a sync offset between the\n\
                  video and data timelines, replays the data timeline against\n\
                  windowed chart views, and exports reports and project records."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "MOTION_REVIEW_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "MOTION_REVIEW_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a review session headlessly
    Replay(ReplayArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),

    /// Inspect an IMU dataset
    Info(InfoArgs),
}

/// Arguments for the `replay` command
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Path to the IMU dataset (CSV upload)
    #[arg(short, long, env = "MOTION_REVIEW_DATA")]
    pub data: PathBuf,

    /// Path to the session configuration file (TOML or JSON)
    #[arg(short, long, env = "MOTION_REVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Playback rate multiplier
    #[arg(long, default_value = "1.0")]
    pub rate: f64,

    /// Simulated video duration in seconds (defaults to the dataset duration)
    #[arg(long)]
    pub video_duration: Option<f64>,

    /// Mark the video timeline at this time before syncing
    #[arg(long)]
    pub mark_video: Option<f64>,

    /// Mark the data timeline at this time before syncing
    #[arg(long)]
    pub mark_data: Option<f64>,

    /// Add an annotation, formatted "time:label:category[:notes]" (repeatable)
    #[arg(long = "annotate", value_name = "SPEC")]
    pub annotations: Vec<String>,

    /// Write the plain-text session report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Project record directory; loads any existing record for the media
    /// before replay and saves an updated one after
    #[arg(long, env = "MOTION_REVIEW_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Run the pose estimator simulation alongside playback
    #[arg(long)]
    pub simulate_pose: bool,

    /// Replay timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "MOTION_REVIEW_TIMEOUT")]
    pub timeout: u64,

    /// Tick rate of the simulated render loop (Hz)
    #[arg(long, default_value = "30.0")]
    pub tick_hz: f64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "MOTION_REVIEW_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "review.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to the IMU dataset (CSV upload)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Sample rate to interpret the dataset at (Hz)
    #[arg(long, default_value = "104.0")]
    pub sample_rate: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
