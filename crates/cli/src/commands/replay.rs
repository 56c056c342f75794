//! `replay` command implementation.

use anyhow::Result;
use tracing::info;

use crate::cli::ReplayArgs;
use crate::session::run_session;

/// Execute the `replay` command
pub async fn run_replay(args: &ReplayArgs) -> Result<()> {
    // Metrics endpoint (optional)
    if args.metrics_port > 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!(port = args.metrics_port, "Metrics endpoint available");
    }

    let stats = run_session(args).await?;
    stats.print_summary();

    Ok(())
}
