//! Per-viewer display buckets and the published snapshot.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::types::status::ClassifiedSwap;

/// Why a swap sits in the removed bucket. Both causes render identically,
/// but the distinction is preserved for anything downstream that cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalCause {
    /// The contract recorded an explicit removal.
    Removed,
    /// `expiry_date` has passed without completion or removal; the contract
    /// will no longer honour the swap even though no event says so.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedSwap {
    pub swap: ClassifiedSwap,
    pub cause: RemovalCause,
}

/// The five disjoint lifecycle buckets for one viewer. Ordering within each
/// bucket is event order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapBuckets {
    /// Live swaps the viewer created.
    pub initiated: Vec<ClassifiedSwap>,
    /// Live swaps naming the viewer as acceptor.
    pub to_accept: Vec<ClassifiedSwap>,
    /// Live open swaps created by someone else.
    pub open: Vec<ClassifiedSwap>,
    /// Settled swaps the viewer was party to.
    pub completed: Vec<ClassifiedSwap>,
    /// Explicitly removed swaps first, then expired ones, viewer-relevant
    /// only.
    pub removed: Vec<RemovedSwap>,
}

impl SwapBuckets {
    pub fn is_empty(&self) -> bool {
        self.initiated.is_empty()
            && self.to_accept.is_empty()
            && self.open.is_empty()
            && self.completed.is_empty()
            && self.removed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.initiated.len()
            + self.to_accept.len()
            + self.open.len()
            + self.completed.len()
            + self.removed.len()
    }
}

/// One committed categorization run. Replaces the previous snapshot
/// wholesale — buckets are never merged incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSnapshot {
    /// Monotonic run sequence number assigned at trigger time.
    pub seq: u64,
    pub viewer: Address,
    pub buckets: SwapBuckets,
    /// User-facing message when the run failed outright (buckets are empty
    /// in that case); `None` on success.
    pub advisory: Option<String>,
}
