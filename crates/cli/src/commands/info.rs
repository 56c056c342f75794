//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::format_clock;
use sample_store::CsvStore;

use crate::cli::InfoArgs;

/// Dataset info for JSON output
#[derive(Serialize)]
struct DatasetInfo {
    path: String,
    rows: usize,
    sample_rate_hz: f64,
    duration_secs: f64,
    duration_clock: String,
    channels: Vec<ChannelInfo>,
    coerced_cells: u64,
}

#[derive(Serialize)]
struct ChannelInfo {
    name: String,
    recognized: bool,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(data = %args.data.display(), "Inspecting dataset");

    if !args.data.exists() {
        anyhow::bail!("Dataset file not found: {}", args.data.display());
    }

    let raw = std::fs::read_to_string(&args.data)
        .with_context(|| format!("Failed to read {}", args.data.display()))?;

    let store = CsvStore::new(args.sample_rate);
    let series = store
        .load(&raw)
        .with_context(|| format!("Failed to parse {}", args.data.display()))?;
    let coerced = store.metrics().snapshot().cells_coerced;

    let dataset = DatasetInfo {
        path: args.data.display().to_string(),
        rows: series.len(),
        sample_rate_hz: series.sample_rate_hz(),
        duration_secs: series.duration(),
        duration_clock: format_clock(series.duration()),
        channels: series
            .channels()
            .iter()
            .map(|c| ChannelInfo {
                name: c.as_str().to_string(),
                recognized: c.is_recognized(),
            })
            .collect(),
        coerced_cells: coerced,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&dataset).context("Failed to serialize dataset info")?
        );
    } else {
        print_dataset_info(&dataset);
    }

    Ok(())
}

fn print_dataset_info(dataset: &DatasetInfo) {
    println!("Dataset: {}", dataset.path);
    println!(
        "  Rows: {} at {} Hz -> {:.3} s ({})",
        dataset.rows, dataset.sample_rate_hz, dataset.duration_secs, dataset.duration_clock
    );

    let recognized: Vec<&str> = dataset
        .channels
        .iter()
        .filter(|c| c.recognized)
        .map(|c| c.name.as_str())
        .collect();
    let other: Vec<&str> = dataset
        .channels
        .iter()
        .filter(|c| !c.recognized)
        .map(|c| c.name.as_str())
        .collect();

    println!("  Charted channels: {}", recognized.join(", "));
    if !other.is_empty() {
        println!("  Other channels: {}", other.join(", "));
    }

    if dataset.coerced_cells > 0 {
        println!(
            "  Note: {} cells could not be parsed and were read as 0",
            dataset.coerced_cells
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_info_missing_file() {
        let args = InfoArgs {
            data: "missing.csv".into(),
            sample_rate: 104.0,
            json: false,
        };
        assert!(run_info(&args).is_err());
    }

    #[test]
    fn test_info_parses_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Time,ax,ay,az,gx,gy,gz,mx,my,mz").unwrap();
        for i in 0..10 {
            writeln!(file, "{i},1,2,3,4,5,6,7,8,9").unwrap();
        }

        let args = InfoArgs {
            data: file.path().to_path_buf(),
            sample_rate: 104.0,
            json: true,
        };
        assert!(run_info(&args).is_ok());
    }
}
