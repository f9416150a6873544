//! Swaplens watcher — headless monitor for the TokenSwapper escrow.
//!
//! Connects an Alloy HTTP provider, polls the escrow's event history on a
//! fixed interval, and logs the viewer's bucket snapshot after every run.
//! Read-only: nothing here signs or submits transactions.

use std::time::Duration;

use alloy::providers::RootProvider;
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use swaplens_engine::chain::{EscrowClient, EscrowTimeouts, TokenMetadataCache};
use swaplens_engine::config::WatchConfig;
use swaplens_engine::core::watcher::{run_watcher, BucketFeed};
use swaplens_engine::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignore if missing).
    let _ = dotenvy::dotenv();

    // Load and validate configuration.
    let config = WatchConfig::from_env().context("failed to load watcher config")?;

    // Initialize tracing — hold the guard for the process lifetime.
    let _guard = logging::init_tracing(&config.log_dir)?;

    info!(
        rpc = %config.rpc_http_url,
        escrow = %config.escrow_address,
        deploy_block = config.deploy_block,
        poll_interval = config.poll_interval_seconds,
        "swap watcher starting"
    );

    // -----------------------------------------------------------------------
    // Components
    // -----------------------------------------------------------------------

    let rpc_url: Url = config
        .rpc_http_url
        .parse()
        .context("failed to parse RPC URL")?;
    let provider = RootProvider::new_http(rpc_url);

    let escrow = config.escrow()?;
    let viewer = config.viewer()?;

    let timeouts = EscrowTimeouts {
        status: Duration::from_secs(config.status_timeout_seconds),
        metadata: Duration::from_secs(config.metadata_timeout_seconds),
    };
    let client = EscrowClient::new(
        provider,
        escrow,
        config.deploy_block,
        TokenMetadataCache::new(),
        timeouts,
    );

    let feed = BucketFeed::new();
    let (viewer_tx, viewer_rx) = watch::channel(viewer);
    let shutdown = CancellationToken::new();
    let poll_interval = Duration::from_secs(config.poll_interval_seconds);

    if viewer.is_none() {
        info!("no viewer address configured — set SWAPLENS_VIEWER to begin categorizing");
    }

    // -----------------------------------------------------------------------
    // Spawn background tasks
    // -----------------------------------------------------------------------

    // 1. Watcher — polls, categorizes, commits snapshots.
    let feed_clone = feed.clone();
    let shutdown_clone = shutdown.clone();
    let watcher_handle = tokio::spawn(async move {
        run_watcher(&client, feed_clone, viewer_rx, poll_interval, shutdown_clone).await;
    });

    // 2. Reporter — logs each newly committed snapshot.
    let shutdown_clone = shutdown.clone();
    let reporter_handle = tokio::spawn(async move {
        run_reporter(feed, poll_interval, shutdown_clone).await;
    });

    info!("all tasks running — press Ctrl+C to shutdown");

    // -----------------------------------------------------------------------
    // Wait for shutdown
    // -----------------------------------------------------------------------

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;

    info!("shutdown signal received, stopping gracefully...");
    shutdown.cancel();
    drop(viewer_tx);

    let (watcher_res, reporter_res) = tokio::join!(watcher_handle, reporter_handle);
    if let Err(e) = watcher_res {
        error!(error = %e, "watcher task panicked");
    }
    if let Err(e) = reporter_res {
        error!(error = %e, "reporter task panicked");
    }

    info!("shutdown complete");
    Ok(())
}

/// Log every newly committed bucket snapshot.
async fn run_reporter(feed: BucketFeed, interval: Duration, shutdown: CancellationToken) {
    let mut last_seq = 0u64;

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.cancelled() => {
                info!("reporter shutting down");
                return;
            }
        }

        let snapshot = feed.current();
        if snapshot.seq == last_seq {
            continue;
        }
        last_seq = snapshot.seq;

        if let Some(advisory) = &snapshot.advisory {
            warn!(seq = snapshot.seq, advisory = %advisory, "categorization run failed");
            continue;
        }

        info!(
            seq = snapshot.seq,
            viewer = %snapshot.viewer,
            initiated = snapshot.buckets.initiated.len(),
            to_accept = snapshot.buckets.to_accept.len(),
            open = snapshot.buckets.open.len(),
            completed = snapshot.buckets.completed.len(),
            removed = snapshot.buckets.removed.len(),
            "bucket snapshot"
        );
    }
}
