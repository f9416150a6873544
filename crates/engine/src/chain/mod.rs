pub mod contracts;
pub mod escrow;
pub mod metadata;

pub use escrow::{EscrowClient, EscrowTimeouts, HttpProvider};
pub use metadata::TokenMetadataCache;

use std::future::Future;

use alloy::primitives::Address;

use crate::errors::EngineError;
use crate::types::{LifecycleEvent, SwapStatusFlags, SwapTerms};

/// Read-only view of the chain consumed by the categorizer and watcher.
///
/// Implemented by [`EscrowClient`]; tests substitute an in-memory stub so
/// the decision logic runs without a network.
pub trait ChainView: Send + Sync {
    /// Full lifecycle event history, sorted chronologically.
    fn lifecycle_events(
        &self,
    ) -> impl Future<Output = Result<Vec<LifecycleEvent>, EngineError>> + Send;

    /// Fresh readiness flags for one swap. Never cached.
    fn swap_status(
        &self,
        terms: &SwapTerms,
    ) -> impl Future<Output = Result<SwapStatusFlags, EngineError>> + Send;

    /// Display name for a token contract. Zero address resolves to "ETH"
    /// without a network call; failures resolve to the sentinel label.
    fn token_name(&self, token: Address) -> impl Future<Output = String> + Send;

    /// Resolved `decimals()` for a token contract, `None` when the lookup
    /// failed (cached so it is not retried).
    fn token_decimals(&self, token: Address) -> impl Future<Output = Option<u8>> + Send;
}
