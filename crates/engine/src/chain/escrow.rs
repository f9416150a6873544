//! Typed read layer over the TokenSwapper escrow contract.
//!
//! Owns the Alloy contract instances, the event-log fetch, and the
//! best-effort token metadata resolution. All methods are read-only RPC
//! calls; nothing here signs or submits.

use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::{BlockNumberOrTag, Filter, Log};
use alloy::sol_types::SolEvent;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_METADATA_TIMEOUT_SECONDS, DEFAULT_STATUS_TIMEOUT_SECONDS, ETH_DECIMALS, ETH_LABEL,
    NAME_UNKNOWN_LABEL,
};
use crate::errors::EngineError;
use crate::types::{EventPosition, LifecycleEvent, SwapStatusFlags, SwapTerms, TokenType};

use super::contracts::{IERC20Metadata, ITokenSwapper};
use super::metadata::TokenMetadataCache;
use super::ChainView;

/// Concrete provider type: Alloy HTTP provider over Ethereum network.
pub type HttpProvider = RootProvider;

/// Per-call timeouts for the two classes of read the client issues.
#[derive(Debug, Clone, Copy)]
pub struct EscrowTimeouts {
    /// `getSwapStatus` — feeds classification, must stay snappy.
    pub status: Duration,
    /// `name()` / `decimals()` — purely cosmetic lookups.
    pub metadata: Duration,
}

impl Default for EscrowTimeouts {
    fn default() -> Self {
        Self {
            status: Duration::from_secs(DEFAULT_STATUS_TIMEOUT_SECONDS),
            metadata: Duration::from_secs(DEFAULT_METADATA_TIMEOUT_SECONDS),
        }
    }
}

/// Read-side client for one deployed escrow contract.
///
/// Accepts an Alloy HTTP provider via dependency injection so the same
/// connection is shared across contract instances. The metadata cache is
/// injected too — it outlives any single client and is clearable on demand.
pub struct EscrowClient {
    swapper: ITokenSwapper::ITokenSwapperInstance<HttpProvider>,
    provider: HttpProvider,
    escrow: Address,
    deploy_block: u64,
    metadata: TokenMetadataCache,
    timeouts: EscrowTimeouts,
}

impl EscrowClient {
    pub fn new(
        provider: HttpProvider,
        escrow: Address,
        deploy_block: u64,
        metadata: TokenMetadataCache,
        timeouts: EscrowTimeouts,
    ) -> Self {
        Self {
            swapper: ITokenSwapper::new(escrow, provider.clone()),
            provider,
            escrow,
            deploy_block,
            metadata,
            timeouts,
        }
    }

    pub fn escrow_address(&self) -> Address {
        self.escrow
    }

    pub fn metadata_cache(&self) -> &TokenMetadataCache {
        &self.metadata
    }

    // -----------------------------------------------------------------------
    // Status query
    // -----------------------------------------------------------------------

    /// Query live readiness flags for one swap with the exact persisted
    /// terms. Timeout-guarded; the caller degrades a failure to Unknown.
    pub async fn query_swap_status(
        &self,
        terms: &SwapTerms,
    ) -> Result<SwapStatusFlags, EngineError> {
        let call = self.swapper.getSwapStatus(terms.swap_id, terms_to_sol(terms));
        match tokio::time::timeout(self.timeouts.status, call.call()).await {
            Ok(Ok(status)) => Ok(flags_from_sol(&status)),
            Ok(Err(e)) => Err(EngineError::StatusQuery {
                swap_id: terms.swap_id.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(EngineError::StatusQuery {
                swap_id: terms.swap_id.to_string(),
                reason: format!("timed out after {}s", self.timeouts.status.as_secs()),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Event log
    // -----------------------------------------------------------------------

    /// Fetch and decode the full lifecycle event history, sorted by
    /// `(block, log index)`. A log that fails to decode is skipped with a
    /// warning; a failed fetch fails the whole run.
    pub async fn fetch_events(&self) -> Result<Vec<LifecycleEvent>, EngineError> {
        let filter = Filter::new()
            .address(self.escrow)
            .from_block(self.deploy_block)
            .to_block(BlockNumberOrTag::Latest)
            .event_signature(vec![
                ITokenSwapper::SwapInitiated::SIGNATURE_HASH,
                ITokenSwapper::SwapComplete::SIGNATURE_HASH,
                ITokenSwapper::SwapRemoved::SIGNATURE_HASH,
            ]);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| EngineError::EventFetch {
                reason: e.to_string(),
            })?;

        let mut events = Vec::with_capacity(logs.len());
        for log in &logs {
            match decode_event(log) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        error = %e,
                        tx = ?log.transaction_hash,
                        "skipping undecodable escrow log"
                    );
                }
            }
        }
        events.sort_by_key(|e| e.position());

        debug!(total = events.len(), "fetched escrow event history");
        Ok(events)
    }

    // -----------------------------------------------------------------------
    // Token metadata (best-effort, cached)
    // -----------------------------------------------------------------------

    /// Resolve a token contract's display name.
    ///
    /// The zero address is the native currency and resolves synchronously.
    /// A failed or timed-out `name()` call caches the sentinel label so the
    /// address is never queried again this session.
    pub async fn resolve_token_name(&self, token: Address) -> String {
        if token == Address::ZERO {
            return ETH_LABEL.to_string();
        }
        if let Some(name) = self.metadata.name(token) {
            return name;
        }

        let erc20 = IERC20Metadata::new(token, self.provider.clone());
        let name = match tokio::time::timeout(self.timeouts.metadata, erc20.name().call()).await {
            Ok(Ok(name)) if !name.is_empty() => name,
            Ok(Ok(_)) => NAME_UNKNOWN_LABEL.to_string(),
            Ok(Err(e)) => {
                debug!(token = %token, error = %e, "name() lookup failed");
                NAME_UNKNOWN_LABEL.to_string()
            }
            Err(_) => {
                debug!(token = %token, "name() lookup timed out");
                NAME_UNKNOWN_LABEL.to_string()
            }
        };

        self.metadata.store_name(token, name.clone());
        name
    }

    /// Resolve a token contract's `decimals()`, caching negative results so
    /// a contract without the accessor is only probed once.
    pub async fn resolve_token_decimals(&self, token: Address) -> Option<u8> {
        if token == Address::ZERO {
            return Some(ETH_DECIMALS);
        }
        if let Some(cached) = self.metadata.decimals(token) {
            return cached;
        }

        let erc20 = IERC20Metadata::new(token, self.provider.clone());
        let resolved =
            match tokio::time::timeout(self.timeouts.metadata, erc20.decimals().call()).await {
                Ok(Ok(decimals)) => Some(decimals),
                Ok(Err(e)) => {
                    debug!(token = %token, error = %e, "decimals() lookup failed");
                    None
                }
                Err(_) => {
                    debug!(token = %token, "decimals() lookup timed out");
                    None
                }
            };

        self.metadata.store_decimals(token, resolved);
        resolved
    }
}

impl ChainView for EscrowClient {
    async fn lifecycle_events(&self) -> Result<Vec<LifecycleEvent>, EngineError> {
        self.fetch_events().await
    }

    async fn swap_status(&self, terms: &SwapTerms) -> Result<SwapStatusFlags, EngineError> {
        self.query_swap_status(terms).await
    }

    async fn token_name(&self, token: Address) -> String {
        self.resolve_token_name(token).await
    }

    async fn token_decimals(&self, token: Address) -> Option<u8> {
        self.resolve_token_decimals(token).await
    }
}

// ---------------------------------------------------------------------------
// ABI <-> domain conversions
// ---------------------------------------------------------------------------

fn terms_to_sol(terms: &SwapTerms) -> ITokenSwapper::Swap {
    ITokenSwapper::Swap {
        expiryDate: U256::from(terms.expiry_date),
        initiator: terms.initiator,
        acceptor: terms.acceptor,
        initiatorERCContract: terms.initiator_erc_contract,
        acceptorERCContract: terms.acceptor_erc_contract,
        initiatorTokenId: terms.initiator_token_id,
        acceptorTokenId: terms.acceptor_token_id,
        initiatorTokenQuantity: terms.initiator_token_quantity,
        acceptorTokenQuantity: terms.acceptor_token_quantity,
        initiatorETHPortion: terms.initiator_eth_portion,
        acceptorETHPortion: terms.acceptor_eth_portion,
        initiatorTokenType: terms.initiator_token_type.as_u8(),
        acceptorTokenType: terms.acceptor_token_type.as_u8(),
    }
}

fn terms_from_sol(swap_id: U256, sol: &ITokenSwapper::Swap) -> Result<SwapTerms, EngineError> {
    Ok(SwapTerms {
        swap_id,
        initiator: sol.initiator,
        acceptor: sol.acceptor,
        initiator_token_type: TokenType::from_u8(sol.initiatorTokenType)?,
        acceptor_token_type: TokenType::from_u8(sol.acceptorTokenType)?,
        initiator_erc_contract: sol.initiatorERCContract,
        acceptor_erc_contract: sol.acceptorERCContract,
        initiator_token_id: sol.initiatorTokenId,
        acceptor_token_id: sol.acceptorTokenId,
        initiator_token_quantity: sol.initiatorTokenQuantity,
        acceptor_token_quantity: sol.acceptorTokenQuantity,
        initiator_eth_portion: sol.initiatorETHPortion,
        acceptor_eth_portion: sol.acceptorETHPortion,
        expiry_date: sol.expiryDate.saturating_to::<u64>(),
    })
}

fn flags_from_sol(sol: &ITokenSwapper::SwapStatus) -> SwapStatusFlags {
    SwapStatusFlags {
        initiator_needs_to_own_token: sol.initiatorNeedsToOwnToken,
        acceptor_needs_to_own_token: sol.acceptorNeedsToOwnToken,
        initiator_token_requires_approval: sol.initiatorTokenRequiresApproval,
        acceptor_token_requires_approval: sol.acceptorTokenRequiresApproval,
        is_ready_for_swapping: sol.isReadyForSwapping,
    }
}

/// Decode one raw log into a lifecycle event. `Ok(None)` means the log is
/// not one of ours (foreign topic); `Err` means it claimed to be ours but
/// the payload was malformed.
fn decode_event(log: &Log) -> Result<Option<LifecycleEvent>, EngineError> {
    let Some(topic0) = log.topic0() else {
        return Ok(None);
    };

    let position = EventPosition {
        block_number: log.block_number.unwrap_or_default(),
        log_index: log.log_index.unwrap_or_default(),
    };

    if *topic0 == ITokenSwapper::SwapInitiated::SIGNATURE_HASH {
        let decoded = ITokenSwapper::SwapInitiated::decode_log(&log.inner).map_err(|e| {
            EngineError::MalformedEvent {
                reason: format!("SwapInitiated: {e}"),
            }
        })?;
        let terms = terms_from_sol(decoded.data.swapId, &decoded.data.swap)?;
        Ok(Some(LifecycleEvent::Initiated {
            swap_id: decoded.data.swapId,
            terms,
            position,
        }))
    } else if *topic0 == ITokenSwapper::SwapComplete::SIGNATURE_HASH {
        let decoded = ITokenSwapper::SwapComplete::decode_log(&log.inner).map_err(|e| {
            EngineError::MalformedEvent {
                reason: format!("SwapComplete: {e}"),
            }
        })?;
        Ok(Some(LifecycleEvent::Completed {
            swap_id: decoded.data.swapId,
            position,
        }))
    } else if *topic0 == ITokenSwapper::SwapRemoved::SIGNATURE_HASH {
        let decoded = ITokenSwapper::SwapRemoved::decode_log(&log.inner).map_err(|e| {
            EngineError::MalformedEvent {
                reason: format!("SwapRemoved: {e}"),
            }
        })?;
        Ok(Some(LifecycleEvent::Removed {
            swap_id: decoded.data.swapId,
            position,
        }))
    } else {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn sample_terms() -> SwapTerms {
        SwapTerms {
            swap_id: U256::from(9),
            initiator: address!("1111111111111111111111111111111111111111"),
            acceptor: address!("2222222222222222222222222222222222222222"),
            initiator_token_type: TokenType::Erc1155,
            acceptor_token_type: TokenType::Erc20,
            initiator_erc_contract: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            acceptor_erc_contract: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            initiator_token_id: U256::from(3),
            acceptor_token_id: U256::ZERO,
            initiator_token_quantity: U256::from(10),
            acceptor_token_quantity: U256::from(2_000),
            initiator_eth_portion: U256::ZERO,
            acceptor_eth_portion: U256::from(5_000),
            expiry_date: 1_900_000_000,
        }
    }

    #[test]
    fn test_terms_sol_round_trip() {
        let terms = sample_terms();
        let sol = terms_to_sol(&terms);
        let back = terms_from_sol(terms.swap_id, &sol).unwrap();
        assert_eq!(back, terms);
    }

    #[test]
    fn test_malformed_token_type_rejected() {
        let mut sol = terms_to_sol(&sample_terms());
        sol.initiatorTokenType = 9;
        let err = terms_from_sol(U256::from(9), &sol).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTokenType(9)));
    }

    #[tokio::test]
    async fn test_zero_address_resolves_eth_without_network() {
        // The provider points nowhere; the zero-address shortcut must answer
        // before any request could be attempted.
        let provider = RootProvider::new_http("http://127.0.0.1:1".parse().unwrap());
        let client = EscrowClient::new(
            provider,
            address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"),
            0,
            TokenMetadataCache::new(),
            EscrowTimeouts::default(),
        );

        assert_eq!(client.resolve_token_name(Address::ZERO).await, ETH_LABEL);
        assert_eq!(
            client.resolve_token_decimals(Address::ZERO).await,
            Some(ETH_DECIMALS)
        );
    }

    #[test]
    fn test_flags_from_sol() {
        let sol = ITokenSwapper::SwapStatus {
            initiatorNeedsToOwnToken: false,
            acceptorNeedsToOwnToken: true,
            initiatorTokenRequiresApproval: true,
            acceptorTokenRequiresApproval: false,
            isReadyForSwapping: false,
        };
        let flags = flags_from_sol(&sol);
        assert!(!flags.initiator_needs_to_own_token);
        assert!(flags.acceptor_needs_to_own_token);
        assert!(flags.initiator_token_requires_approval);
        assert!(!flags.acceptor_token_requires_approval);
    }
}
