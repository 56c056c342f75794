//! Replay orchestration - coordinates all components.
//!
//! Loads the dataset asynchronously, wires the session, controllers and
//! chart surfaces together, establishes the sync offset from the requested
//! marks, then drives the playback loop until the data timeline reaches its
//! end (or the timeout fires).

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use config_loader::ConfigLoader;
use contracts::{mean_score, project_key, PoseSource, SampleSeries, SessionConfig, TimestepNote};
use observability::{
    record_playback_state, record_render_metrics, record_scrub, SessionMetricsAggregator,
};
use playback::{await_ready, PlaybackDriver, Tick};
use project_store::{write_report, AnnotationLog, FileProjectStore, ProjectStore};
use sample_store::CsvStore;
use sync_engine::{scrub_channel, ChartUpdater, Session};

use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::session::{LogChart, MockPoseSource, ReplayStats};

/// Run one headless replay to completion.
pub async fn run_session(args: &ReplayArgs) -> Result<ReplayStats> {
    let start_time = Instant::now();

    // Configuration
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if !args.data.exists() {
        return Err(CliError::DataNotFound {
            path: args.data.display().to_string(),
        }
        .into());
    }
    let media_size = std::fs::metadata(&args.data)?.len();
    let media_name = args
        .data
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dataset.csv")
        .to_string();

    // Asynchronous dataset load. Availability is re-checked by short
    // bounded polling, the same way an interactive session re-enables its
    // playback controls after an import completes.
    let slot: Arc<Mutex<Option<(SampleSeries, u64)>>> = Arc::new(Mutex::new(None));
    let loader_slot = slot.clone();
    let data_path = args.data.clone();
    let sample_rate = config.sample_rate_hz;
    let loader = tokio::spawn(async move {
        let raw = tokio::fs::read_to_string(&data_path)
            .await
            .with_context(|| format!("Failed to read {}", data_path.display()))?;
        let store = CsvStore::new(sample_rate);
        let series = store.load(&raw).context("Failed to parse dataset")?;
        let coerced = store.metrics().snapshot().cells_coerced;
        *loader_slot.lock().unwrap() = Some((series, coerced));
        Ok::<(), anyhow::Error>(())
    });

    let probe_slot = slot.clone();
    await_ready(
        move || probe_slot.lock().unwrap().is_some(),
        100,
        Duration::from_millis(20),
    )
    .await;
    loader.await.context("Dataset loader panicked")??;

    let Some((series, cells_coerced)) = slot.lock().unwrap().take() else {
        bail!("Dataset did not become available");
    };

    info!(
        rows = series.len(),
        coerced = cells_coerced,
        duration = series.duration(),
        "Dataset ready"
    );

    // Session setup
    let mut session = Session::new(config.clone());
    let rows_loaded = series.len();
    session.load_series(series);
    let data_duration = session.data_duration();
    session.set_video_duration(args.video_duration.unwrap_or(data_duration));

    // Fresh control bindings for this load; bind drops any stale listener
    let (video_tx, video_rx) = scrub_channel();
    let (data_tx, data_rx) = scrub_channel();
    session.bind_video_control(video_rx);
    session.bind_data_control(data_rx);

    // Chart surfaces, one per configured channel group
    let mut updater = ChartUpdater::new();
    for group in config.channel_groups() {
        let name = group.name.clone();
        updater.attach(group, Box::new(LogChart::new(name)));
    }

    // Playback driver, re-checked against the freshly loaded dataset
    let mut driver = PlaybackDriver::new(&config.playback);
    driver.set_dataset(data_duration, 1.0 / config.sample_rate_hz);
    driver.set_rate(args.rate);

    // Project restore: offset and annotations only, playheads stay put
    let mut annotations = AnnotationLog::new();
    let key = project_key(&media_name, media_size);
    let mut project = match &args.project_dir {
        Some(dir) => {
            Some(FileProjectStore::new("projects", dir).context("Failed to open project store")?)
        }
        None => None,
    };
    if let Some(store) = project.as_mut() {
        if let Some(record) = store.load(&key).await? {
            info!(
                offset = record.sync_offset,
                annotations = record.timestamps.len(),
                "Existing project record restored"
            );
            annotations = AnnotationLog::from_entries(record.timestamps.clone());
            session.apply_project(&record);
        }
    }

    for spec in &args.annotations {
        annotations.append(parse_annotation(spec)?);
    }

    let mut aggregator = SessionMetricsAggregator::new();
    let mut stats = ReplayStats {
        rows_loaded,
        cells_coerced,
        ..Default::default()
    };

    // Marks arrive through the scrub controls, exactly like slider input
    if let Some(t) = args.mark_video {
        let _ = video_tx.try_send(t);
    }
    for requested in session.drain_video_scrubs() {
        let scrub = session.scrub_video(requested);
        record_scrub("video", requested, scrub.actual_time);
        aggregator.update_scrub("video", requested, scrub.actual_time);
        render_at(
            &session,
            &mut updater,
            &mut aggregator,
            &mut stats,
            scrub.reference_time,
        );
    }
    if args.mark_video.is_some() {
        session.mark_video();
    }

    if let Some(t) = args.mark_data {
        let _ = data_tx.try_send(t);
    }
    for requested in session.drain_data_scrubs() {
        driver.on_manual_scrub();
        if let Some(snapped) = session.scrub_data(requested) {
            record_scrub("data", requested, snapped);
            aggregator.update_scrub("data", requested, snapped);
            render_at(&session, &mut updater, &mut aggregator, &mut stats, snapped);
        }
    }
    if args.mark_data.is_some() {
        session.mark_data();
    }

    if session.can_apply_sync() {
        if let Some(offset) = session.apply_sync() {
            info!(offset, "Sync offset applied");
        }
    } else if args.mark_video.is_some() || args.mark_data.is_some() {
        warn!("Sync not applied: both marks are required");
    }

    // Playback
    if !driver.play() {
        bail!("Playback refused: dataset is empty");
    }
    record_playback_state(true);

    let mut pose = args.simulate_pose.then(MockPoseSource::new);
    let pose_frame = MockPoseSource::blank_frame(192, 192);

    let tick_period = Duration::from_secs_f64(1.0 / args.tick_hz.clamp(1.0, 240.0));
    let replay_loop = async {
        let mut interval = tokio::time::interval(tick_period);
        let mut last = Instant::now();

        loop {
            interval.tick().await;
            let elapsed = last.elapsed().as_secs_f64();
            last = Instant::now();
            stats.ticks += 1;

            // Manual interaction always wins over automatic playback
            for requested in session.drain_data_scrubs() {
                driver.on_manual_scrub();
                record_playback_state(driver.is_playing());
                if let Some(snapped) = session.scrub_data(requested) {
                    record_scrub("data", requested, snapped);
                    aggregator.update_scrub("data", requested, snapped);
                    render_at(&session, &mut updater, &mut aggregator, &mut stats, snapped);
                }
            }
            for requested in session.drain_video_scrubs() {
                let scrub = session.scrub_video(requested);
                record_scrub("video", requested, scrub.actual_time);
                aggregator.update_scrub("video", requested, scrub.actual_time);
                render_at(
                    &session,
                    &mut updater,
                    &mut aggregator,
                    &mut stats,
                    scrub.reference_time,
                );
            }

            if let Some(source) = pose.as_mut() {
                if let Some(keypoints) = source.estimate(&pose_frame) {
                    stats.pose_frames += 1;
                    stats.pose_score.push(mean_score(&keypoints));
                }
            }

            match driver.tick(session.data().current_time(), elapsed) {
                Tick::Idle => break,
                Tick::Advance(next) => {
                    if let Some(snapped) = session.scrub_data(next) {
                        render_at(&session, &mut updater, &mut aggregator, &mut stats, snapped);
                    }
                }
                Tick::Finished(end) => {
                    if let Some(snapped) = session.scrub_data(end) {
                        render_at(&session, &mut updater, &mut aggregator, &mut stats, snapped);
                    }
                    info!(end, "Playback reached the dataset end");
                    break;
                }
            }
        }
    };

    if args.timeout > 0 {
        if tokio::time::timeout(Duration::from_secs(args.timeout), replay_loop)
            .await
            .is_err()
        {
            warn!(timeout_secs = args.timeout, "Replay timed out");
        }
    } else {
        replay_loop.await;
    }

    record_playback_state(false);
    stats.sync_offset = session.sync().offset();
    stats.end_time = session.data().current_time();
    stats.duration = start_time.elapsed();
    stats.summary = aggregator.summary();

    // Persist the project record
    if let Some(store) = project.as_mut() {
        let record = session.to_project_record(annotations.to_entries(), "");
        store.save(&key, &record).await?;
        store.close().await?;
        info!(key = %key, "Project record saved");
    }

    // Export the report
    if let Some(path) = &args.report {
        write_report(path, &media_name, session.data_duration(), &annotations)?;
        println!("Report written to {}", path.display());
    }

    Ok(stats)
}

/// Render the chart window at a data-timeline reference and fold the
/// outcome into the run statistics.
fn render_at(
    session: &Session,
    updater: &mut ChartUpdater,
    aggregator: &mut SessionMetricsAggregator,
    stats: &mut ReplayStats,
    reference_time: f64,
) {
    if let Some(meta) = updater.render(session.series(), reference_time) {
        record_render_metrics(&meta);
        aggregator.update_render(&meta);
        stats.renders += 1;
    }
}

/// Parse a `time:label:category[:notes]` annotation spec.
fn parse_annotation(spec: &str) -> Result<TimestepNote> {
    let mut parts = spec.splitn(4, ':');
    let (Some(time), Some(label), Some(category)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CliError::AnnotationSpec {
            spec: spec.to_string(),
        }
        .into());
    };

    let time: f64 = time.trim().parse().map_err(|_| CliError::AnnotationSpec {
        spec: spec.to_string(),
    })?;

    Ok(TimestepNote {
        time,
        label: label.trim().to_string(),
        category: category.trim().to_string(),
        notes: parts.next().unwrap_or("").trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotation_full() {
        let note = parse_annotation("2.5:heel strike:gait:left side").unwrap();
        assert_eq!(note.time, 2.5);
        assert_eq!(note.label, "heel strike");
        assert_eq!(note.category, "gait");
        assert_eq!(note.notes, "left side");
    }

    #[test]
    fn test_parse_annotation_without_notes() {
        let note = parse_annotation("1.0:toe off:gait").unwrap();
        assert_eq!(note.notes, "");
    }

    #[test]
    fn test_parse_annotation_rejects_malformed() {
        assert!(parse_annotation("1.0:only-label").is_err());
        assert!(parse_annotation("not-a-number:label:cat").is_err());
    }
}
