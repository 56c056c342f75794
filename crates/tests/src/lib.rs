//! # Integration Tests
//!
//! End-to-end tests across the review pipeline crates.
//!
//! Covers:
//! - The full upload -> sync -> scrub -> windowed render scenario
//! - Playback termination and preemption against a real session
//! - Stream ingest -> recording -> dataset round trips
//! - Project persistence semantics (offset restored, playheads untouched)

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use contracts::{ChannelId, ChartSurface};
    use sync_engine::MemoryChart;

    /// Chart surface handle that stays inspectable after being attached.
    #[derive(Clone, Default)]
    pub struct SharedChart(pub Arc<Mutex<MemoryChart>>);

    impl SharedChart {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ChartSurface for SharedChart {
        fn set_series(&mut self, channel: &ChannelId, points: Vec<[f64; 2]>) {
            self.0.lock().unwrap().set_series(channel, points);
        }
        fn set_visible_range(&mut self, min: f64, max: f64) {
            self.0.lock().unwrap().set_visible_range(min, max);
        }
        fn set_marker(&mut self, percent: f64) {
            self.0.lock().unwrap().set_marker(percent);
        }
        fn redraw(&mut self) {
            self.0.lock().unwrap().redraw();
        }
    }

    /// Canonical upload: `rows` data rows at 104 Hz with a Time column.
    pub fn upload_csv(rows: usize) -> String {
        let mut raw = String::from("Time,ax,ay,az,gx,gy,gz,mx,my,mz\n");
        for i in 0..rows {
            let t = i as f64 / 104.0;
            raw.push_str(&format!(
                "{t},{},{},9.8,0.1,0.2,0.3,10,20,30\n",
                i as f64 * 0.01,
                -(i as f64) * 0.01,
            ));
        }
        raw
    }
}

#[cfg(test)]
mod e2e_tests {
    use contracts::{ChannelGroup, SessionConfig};
    use playback::{PlaybackDriver, Tick};
    use sample_store::CsvStore;
    use sync_engine::{scrub_channel, ChartUpdater, Session};

    use crate::support::{upload_csv, SharedChart};

    /// The full review flow: 312-row upload at 104 Hz, manual sync,
    /// video scrub driving the data-side window through the offset.
    #[test]
    fn test_upload_sync_scrub_render_scenario() {
        let store = CsvStore::new(104.0);
        let series = store.load(&upload_csv(312)).unwrap();
        assert!((series.duration() - 3.0).abs() < 1e-9);

        let mut session = Session::new(SessionConfig::default());
        session.load_series(series);
        session.set_video_duration(10.0);

        let mut updater = ChartUpdater::new();
        let acc = SharedChart::new();
        let gyro = SharedChart::new();
        let mag = SharedChart::new();
        updater.attach(
            ChannelGroup::new("Accelerometer", ["ax", "ay", "az"]),
            Box::new(acc.clone()),
        );
        updater.attach(
            ChannelGroup::new("Gyroscope", ["gx", "gy", "gz"]),
            Box::new(gyro.clone()),
        );
        updater.attach(
            ChannelGroup::new("Magnetometer", ["mx", "my", "mz"]),
            Box::new(mag.clone()),
        );

        // Scrub the data slider to 1.5s: snapped to sample 156 exactly
        let snapped = session.scrub_data(1.5).unwrap();
        assert!((snapped - 1.5).abs() < 1e-9);
        updater.render(session.series(), snapped).unwrap();

        // Mark both timelines and apply: offset = 0.2 - 1.5 = -1.3
        session.scrub_video(0.2);
        session.mark_video();
        session.mark_data();
        let offset = session.apply_sync().unwrap();
        assert!((offset - (-1.3)).abs() < 1e-9);

        // Scrubbing video to 2.0 requests a window centered at 3.3
        let scrub = session.scrub_video(2.0);
        assert!((scrub.reference_time - 3.3).abs() < 1e-9);
        let meta = updater
            .render(session.series(), scrub.reference_time)
            .unwrap();
        assert!((meta.window_start - 0.8).abs() < 1e-9);
        assert!((meta.window_end - 5.8).abs() < 1e-9);
        assert!((meta.marker_percent - 50.0).abs() < 1e-9);
        assert_eq!(meta.surfaces_updated, 3);

        // Every chart holds the full unfiltered point set with the window
        // applied as view bounds only
        for chart in [&acc, &gyro, &mag] {
            let chart = chart.0.lock().unwrap();
            let (min, max) = chart.visible_range.unwrap();
            assert!((min - 0.8).abs() < 1e-9);
            assert!((max - 5.8).abs() < 1e-9);
        }
        assert_eq!(acc.0.lock().unwrap().points_for("ax").unwrap().len(), 312);
        assert_eq!(mag.0.lock().unwrap().points_for("mz").unwrap().len(), 312);

        // The data playhead was not moved by the video scrub
        assert!((session.data().current_time() - 1.5).abs() < 1e-9);
    }

    /// Playback advances the data playhead, clamps at the end and stops.
    #[test]
    fn test_playback_runs_to_completion() {
        let store = CsvStore::new(104.0);
        // 312 rows -> 3.0 s dataset
        let series = store.load(&upload_csv(312)).unwrap();
        let mut session = Session::new(SessionConfig::default());
        session.load_series(series);

        let mut driver = PlaybackDriver::new(&SessionConfig::default().playback);
        driver.set_dataset(session.data_duration(), 1.0 / 104.0);
        driver.set_rate(2.0);
        assert!(driver.play());

        let mut renders = 0;
        let mut updater = ChartUpdater::new();
        let chart = SharedChart::new();
        updater.attach(
            ChannelGroup::new("Accelerometer", ["ax", "ay", "az"]),
            Box::new(chart.clone()),
        );

        // Simulated 30 Hz render loop; 3 s at rate 2 is ~45 ticks
        let mut ticks = 0;
        loop {
            ticks += 1;
            assert!(ticks <= 200, "playback failed to terminate");
            match driver.tick(session.data().current_time(), 1.0 / 30.0) {
                Tick::Advance(next) => {
                    let snapped = session.scrub_data(next).unwrap();
                    if updater.render(session.series(), snapped).is_some() {
                        renders += 1;
                    }
                }
                Tick::Finished(end) => {
                    session.scrub_data(end).unwrap();
                    break;
                }
                Tick::Idle => panic!("driver went idle mid-playback"),
            }
        }

        assert!(!driver.is_playing());
        // Playhead pinned to the last sample timestamp
        assert!((session.data().current_time() - 311.0 / 104.0).abs() < 1e-9);
        assert!(renders > 0);
        // A stale tick after the stop applies nothing
        assert_eq!(
            driver.tick(session.data().current_time(), 1.0),
            Tick::Idle
        );
    }

    /// A manual scrub while playing pauses the driver before it can fight
    /// the user over the control.
    #[test]
    fn test_manual_scrub_preempts_playback() {
        let store = CsvStore::new(104.0);
        let series = store.load(&upload_csv(312)).unwrap();
        let mut session = Session::new(SessionConfig::default());
        session.load_series(series);

        let mut driver = PlaybackDriver::new(&SessionConfig::default().playback);
        driver.set_dataset(session.data_duration(), 1.0 / 104.0);
        driver.play();

        let (tx, rx) = scrub_channel();
        session.bind_data_control(rx);
        tx.try_send(2.0).unwrap();

        for requested in session.drain_data_scrubs() {
            driver.on_manual_scrub();
            session.scrub_data(requested).unwrap();
        }

        assert!(!driver.is_playing());
        assert!((session.data().current_time() - 2.0).abs() < 1e-9);
        assert_eq!(driver.tick(2.0, 1.0), Tick::Idle);
    }

    /// Re-binding after every load delivers each scrub exactly once.
    #[test]
    fn test_rebind_after_reload_has_single_listener() {
        let store = CsvStore::new(104.0);
        let mut session = Session::new(SessionConfig::default());

        session.load_series(store.load(&upload_csv(104)).unwrap());
        let (old_tx, old_rx) = scrub_channel();
        session.bind_data_control(old_rx);

        // Wholesale replacement drops the old binding...
        session.load_series(store.load(&upload_csv(208)).unwrap());
        assert!(!session.data().is_bound());
        assert!(old_tx.try_send(0.5).is_err());

        // ...and the fresh binding is the only listener
        let (tx, rx) = scrub_channel();
        session.bind_data_control(rx);
        tx.try_send(1.0).unwrap();
        assert_eq!(session.drain_data_scrubs(), vec![1.0]);
        assert!(session.drain_data_scrubs().is_empty());
    }
}

#[cfg(test)]
mod stream_tests {
    use bytes::Bytes;
    use contracts::SessionConfig;
    use sample_store::{
        CsvStore, FrameAssembler, Recording, StreamSample, PACKET_TYPE_DATA,
        PACKET_TYPE_DATA_PART2,
    };
    use sync_engine::Session;

    /// Raw two-part notification packets for one 8-sample frame whose
    /// every value is `base`.
    fn frame_packets(counter: u32, base: f32) -> (Bytes, Bytes) {
        let mut frame = vec![0u8; 294];
        frame[0] = PACKET_TYPE_DATA;
        frame[2..6].copy_from_slice(&counter.to_le_bytes());
        for i in 0..8 {
            for block in 0..3 {
                for axis in 0..3 {
                    let off = 6 + i * 12 + block * 96 + axis * 4;
                    frame[off..off + 4].copy_from_slice(&base.to_le_bytes());
                }
            }
        }
        let part1 = Bytes::copy_from_slice(&frame[..147]);
        let mut part2 = vec![PACKET_TYPE_DATA_PART2, 99];
        part2.extend_from_slice(&frame[147..]);
        (part1, Bytes::from(part2))
    }

    /// Live stream -> recording -> CSV -> session, end to end.
    #[test]
    fn test_stream_recording_to_session() {
        let mut assembler = FrameAssembler::new();
        let mut recording = Recording::new(104.0);

        for frame_idx in 0..13u32 {
            let (p1, p2) = frame_packets(frame_idx * 8, frame_idx as f32);
            assert!(assembler.push(p1).is_empty());
            for sample in assembler.push(p2) {
                recording.push(sample);
            }
        }
        assert_eq!(recording.len(), 104);

        // Round trip through the canonical CSV layout
        let store = CsvStore::new(104.0);
        let series = store.load(&recording.to_csv()).unwrap();
        assert_eq!(series.len(), 104);
        assert!((series.duration() - 1.0).abs() < 1e-9);

        let mut session = Session::new(SessionConfig::default());
        session.load_series(series);
        let snapped = session.scrub_data(0.5).unwrap();
        assert!((snapped - 52.0 / 104.0).abs() < 1e-9);
    }

    #[test]
    fn test_stream_sample_channel_access() {
        let sample = StreamSample {
            index: 0,
            acc: [1.0, 2.0, 3.0],
            gyro: [4.0, 5.0, 6.0],
            mag: [7.0, 8.0, 9.0],
        };
        for (channel, expected) in [("ax", 1.0), ("gy", 5.0), ("mz", 9.0)] {
            assert_eq!(sample.value(channel), Some(expected));
        }
    }
}

#[cfg(test)]
mod persistence_tests {
    use contracts::{project_key, SessionConfig, TimestepNote};
    use project_store::{render_report, AnnotationLog, FileProjectStore, ProjectStore};
    use sample_store::CsvStore;
    use sync_engine::Session;
    use tempfile::tempdir;

    use crate::support::upload_csv;

    /// Saving and re-loading a project restores the offset and annotations
    /// without re-synchronizing either playhead.
    #[tokio::test]
    async fn test_project_round_trip_leaves_playheads() {
        let dir = tempdir().unwrap();
        let mut store = FileProjectStore::new("projects", dir.path()).unwrap();
        let key = project_key("session1.mp4", 123_456);

        // First session: establish an offset and annotate
        let csv = CsvStore::new(104.0);
        let mut session = Session::new(SessionConfig::default());
        session.load_series(csv.load(&upload_csv(312)).unwrap());
        session.set_video_duration(10.0);
        session.scrub_video(0.2);
        session.mark_video();
        session.scrub_data(1.5);
        session.mark_data();
        session.apply_sync().unwrap();

        let mut annotations = AnnotationLog::new();
        annotations.append(TimestepNote {
            time: 1.5,
            label: "heel strike".into(),
            category: "gait".into(),
            notes: String::new(),
        });

        let record = session.to_project_record(annotations.to_entries(), "first pass");
        store.save(&key, &record).await.unwrap();

        // Second session: playheads parked elsewhere before the restore
        let mut restored = Session::new(SessionConfig::default());
        restored.load_series(csv.load(&upload_csv(312)).unwrap());
        restored.set_video_duration(10.0);
        restored.scrub_video(7.0);
        restored.scrub_data(2.5);

        let loaded = store.load(&key).await.unwrap().unwrap();
        restored.apply_project(&loaded);
        let log = AnnotationLog::from_entries(loaded.timestamps);

        assert!((restored.sync().offset() - (-1.3)).abs() < 1e-9);
        assert_eq!(log.len(), 1);
        // Restoring never moves the playheads
        assert!((restored.video().current_time() - 7.0).abs() < 1e-9);
        assert!((restored.data().current_time() - 2.5).abs() < 1e-9);

        // And the report reflects the restored annotations
        let report = render_report("session1.mp4", restored.data_duration(), &log);
        assert!(report.contains("heel strike"));
    }
}

#[cfg(test)]
mod readiness_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use contracts::{SampleSeries, SessionConfig};
    use playback::{await_ready, PlaybackDriver};
    use sample_store::CsvStore;

    use crate::support::upload_csv;

    /// Dataset availability changes asynchronously; the driver's enablement
    /// is re-checked by bounded polling once the import lands.
    #[tokio::test]
    async fn test_enablement_follows_async_load() {
        let slot: Arc<Mutex<Option<SampleSeries>>> = Arc::new(Mutex::new(None));

        let loader_slot = slot.clone();
        let loader = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            let series = CsvStore::new(104.0).load(&upload_csv(312)).unwrap();
            *loader_slot.lock().unwrap() = Some(series);
        });

        let mut driver = PlaybackDriver::new(&SessionConfig::default().playback);
        assert!(!driver.is_enabled());

        let probe_slot = slot.clone();
        let ready = await_ready(
            move || probe_slot.lock().unwrap().is_some(),
            50,
            Duration::from_millis(10),
        )
        .await;
        assert!(ready);
        loader.await.unwrap();

        let series = slot.lock().unwrap().take().unwrap();
        driver.set_dataset(series.duration(), 1.0 / series.sample_rate_hz());
        assert!(driver.is_enabled());
        assert!(driver.play());
    }
}
