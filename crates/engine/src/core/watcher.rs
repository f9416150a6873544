//! Polling re-categorization loop and the snapshot store it publishes to.
//!
//! Each run recomputes every bucket from the full event history and replaces
//! the previous snapshot wholesale. Runs are tagged with a monotonically
//! increasing sequence number; a slow run that finishes after a newer run
//! has committed is discarded instead of clobbering fresher data.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::Address;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chain::ChainView;
use crate::core::categorizer::categorize;
use crate::types::{BucketSnapshot, SwapBuckets};

/// Advisory surfaced when a run's event fetch fails outright.
pub const FETCH_FAILED_ADVISORY: &str = "Unable to load swaps right now. Retrying shortly.";

// ---------------------------------------------------------------------------
// Snapshot store
// ---------------------------------------------------------------------------

/// Shared store for the latest committed categorization snapshot.
///
/// Readers always see a complete snapshot from a single run — never a
/// partial merge of two runs.
#[derive(Debug, Clone, Default)]
pub struct BucketFeed {
    inner: Arc<Mutex<BucketSnapshot>>,
}

impl BucketFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> BucketSnapshot {
        self.inner.lock().expect("bucket feed lock poisoned").clone()
    }

    /// Commit a run's snapshot. Returns `false` (and changes nothing) when a
    /// run with an equal or newer sequence number has already committed.
    pub fn commit(&self, snapshot: BucketSnapshot) -> bool {
        let mut current = self.inner.lock().expect("bucket feed lock poisoned");
        if snapshot.seq <= current.seq {
            return false;
        }
        *current = snapshot;
        true
    }
}

// ---------------------------------------------------------------------------
// Polling loop
// ---------------------------------------------------------------------------

/// Run the categorization loop until shutdown.
///
/// Re-categorizes on a fixed interval while a viewer is set, and immediately
/// whenever the viewer address changes. With no viewer the loop idles.
pub async fn run_watcher<V: ChainView>(
    view: &V,
    feed: BucketFeed,
    mut viewer_rx: watch::Receiver<Option<Address>>,
    poll_interval: Duration,
    shutdown: CancellationToken,
) {
    let mut seq: u64 = 0;

    loop {
        let viewer = *viewer_rx.borrow_and_update();
        if let Some(viewer) = viewer {
            seq += 1;
            run_cycle(view, &feed, viewer, seq).await;
        }

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            changed = viewer_rx.changed() => {
                if changed.is_err() {
                    info!("viewer channel closed, watcher stopping");
                    return;
                }
                debug!("viewer changed, re-categorizing immediately");
            }
            _ = shutdown.cancelled() => {
                info!("watcher shutting down");
                return;
            }
        }
    }
}

/// One full categorization cycle: fetch, categorize, commit.
///
/// A failed event fetch is fatal to this run only — it commits empty buckets
/// with an advisory message and the next trigger retries from scratch.
pub async fn run_cycle<V: ChainView>(view: &V, feed: &BucketFeed, viewer: Address, seq: u64) {
    let now = unix_now();

    let snapshot = match view.lifecycle_events().await {
        Ok(events) => {
            let buckets = categorize(view, &events, viewer, now).await;
            debug!(seq, total = buckets.total(), "categorization run finished");
            BucketSnapshot {
                seq,
                viewer,
                buckets,
                advisory: None,
            }
        }
        Err(e) => {
            warn!(seq, error = %e, "event fetch failed; resetting buckets for this run");
            BucketSnapshot {
                seq,
                viewer,
                buckets: SwapBuckets::default(),
                advisory: Some(FETCH_FAILED_ADVISORY.to_string()),
            }
        }
    };

    if !feed.commit(snapshot) {
        debug!(seq, "superseded categorization run discarded");
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::types::{
        EventPosition, LifecycleEvent, SwapStatusFlags, SwapTerms, TokenType,
    };
    use alloy::primitives::{address, U256};

    fn viewer() -> Address {
        address!("1111111111111111111111111111111111111111")
    }

    fn snapshot(seq: u64) -> BucketSnapshot {
        BucketSnapshot {
            seq,
            viewer: viewer(),
            buckets: SwapBuckets::default(),
            advisory: None,
        }
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let feed = BucketFeed::new();

        assert!(feed.commit(snapshot(2)));
        assert_eq!(feed.current().seq, 2);

        // An older, slower run resolving late must not overwrite.
        assert!(!feed.commit(snapshot(1)));
        assert!(!feed.commit(snapshot(2)));
        assert_eq!(feed.current().seq, 2);

        assert!(feed.commit(snapshot(3)));
        assert_eq!(feed.current().seq, 3);
    }

    struct StubView {
        events: Vec<LifecycleEvent>,
        fail_fetch: bool,
    }

    impl ChainView for StubView {
        async fn lifecycle_events(&self) -> Result<Vec<LifecycleEvent>, EngineError> {
            if self.fail_fetch {
                return Err(EngineError::EventFetch {
                    reason: "stub outage".to_string(),
                });
            }
            Ok(self.events.clone())
        }

        async fn swap_status(&self, _terms: &SwapTerms) -> Result<SwapStatusFlags, EngineError> {
            Ok(SwapStatusFlags {
                is_ready_for_swapping: true,
                ..Default::default()
            })
        }

        async fn token_name(&self, _token: Address) -> String {
            "Mock Token".to_string()
        }

        async fn token_decimals(&self, _token: Address) -> Option<u8> {
            Some(18)
        }
    }

    fn live_event() -> LifecycleEvent {
        LifecycleEvent::Initiated {
            swap_id: U256::from(1),
            terms: SwapTerms {
                swap_id: U256::from(1),
                initiator: viewer(),
                acceptor: address!("2222222222222222222222222222222222222222"),
                initiator_token_type: TokenType::Erc20,
                acceptor_token_type: TokenType::None,
                initiator_erc_contract: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
                acceptor_erc_contract: Address::ZERO,
                initiator_token_id: U256::ZERO,
                acceptor_token_id: U256::ZERO,
                initiator_token_quantity: U256::from(5),
                acceptor_token_quantity: U256::ZERO,
                initiator_eth_portion: U256::ZERO,
                acceptor_eth_portion: U256::from(1),
                expiry_date: u64::MAX,
            },
            position: EventPosition {
                block_number: 1,
                log_index: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_cycle_commits_buckets() {
        let view = StubView {
            events: vec![live_event()],
            fail_fetch: false,
        };
        let feed = BucketFeed::new();

        run_cycle(&view, &feed, viewer(), 1).await;

        let snap = feed.current();
        assert_eq!(snap.seq, 1);
        assert_eq!(snap.buckets.initiated.len(), 1);
        assert!(snap.advisory.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_resets_buckets_with_advisory() {
        let view = StubView {
            events: vec![live_event()],
            fail_fetch: false,
        };
        let feed = BucketFeed::new();
        run_cycle(&view, &feed, viewer(), 1).await;
        assert!(!feed.current().buckets.is_empty());

        let broken = StubView {
            events: Vec::new(),
            fail_fetch: true,
        };
        run_cycle(&broken, &feed, viewer(), 2).await;

        let snap = feed.current();
        assert_eq!(snap.seq, 2);
        assert!(snap.buckets.is_empty());
        assert_eq!(snap.advisory.as_deref(), Some(FETCH_FAILED_ADVISORY));
    }

    #[tokio::test]
    async fn test_superseded_cycle_does_not_overwrite() {
        let view = StubView {
            events: vec![live_event()],
            fail_fetch: false,
        };
        let feed = BucketFeed::new();

        // A newer run already committed.
        assert!(feed.commit(snapshot(5)));

        run_cycle(&view, &feed, viewer(), 3).await;
        assert_eq!(feed.current().seq, 5);
        assert!(feed.current().buckets.is_empty());
    }
}
