//! Display-ready projection of a swap's terms.
//!
//! Everything the detail pane renders, with raw integers already converted
//! to decimal strings and the expiry formatted as a timestamp. Built once
//! per view; the presentation layer never touches `U256`.

use alloy::primitives::{Address, U256};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::chain::ChainView;
use crate::constants::{ETH_DECIMALS, ETH_LABEL};
use crate::core::normalize::{display_amount, format_eth};
use crate::types::{SwapTerms, TokenType};

/// Resolved display metadata for one leg of a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegMetadata {
    pub name: String,
    /// `None` when the `decimals()` lookup failed for this leg's contract.
    pub decimals: Option<u8>,
}

/// Flattened, stringly-typed detail view of one swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapDetailView {
    pub swap_id: String,
    pub is_open: bool,
    pub initiator: Address,
    /// `None` for an open swap.
    pub acceptor: Option<Address>,
    pub initiator_token_name: String,
    pub acceptor_token_name: String,
    pub initiator_token_type: TokenType,
    pub acceptor_token_type: TokenType,
    /// Set for ERC-721/1155 legs only.
    pub initiator_token_id: Option<String>,
    pub acceptor_token_id: Option<String>,
    pub initiator_amount: String,
    pub acceptor_amount: String,
    pub initiator_eth_portion: String,
    pub acceptor_eth_portion: String,
    pub expiry_unix: u64,
    /// Human-readable UTC rendering of the expiry.
    pub expires_at: String,
}

impl SwapDetailView {
    pub fn project(terms: &SwapTerms, initiator_leg: &LegMetadata, acceptor_leg: &LegMetadata) -> Self {
        Self {
            swap_id: terms.swap_id.to_string(),
            is_open: terms.is_open(),
            initiator: terms.initiator,
            acceptor: (!terms.is_open()).then_some(terms.acceptor),
            initiator_token_name: initiator_leg.name.clone(),
            acceptor_token_name: acceptor_leg.name.clone(),
            initiator_token_type: terms.initiator_token_type,
            acceptor_token_type: terms.acceptor_token_type,
            initiator_token_id: token_id_string(terms.initiator_token_type, terms.initiator_token_id),
            acceptor_token_id: token_id_string(terms.acceptor_token_type, terms.acceptor_token_id),
            initiator_amount: display_amount(
                terms.initiator_token_type,
                terms.initiator_token_quantity,
                initiator_leg.decimals,
            ),
            acceptor_amount: display_amount(
                terms.acceptor_token_type,
                terms.acceptor_token_quantity,
                acceptor_leg.decimals,
            ),
            initiator_eth_portion: format_eth(terms.initiator_eth_portion),
            acceptor_eth_portion: format_eth(terms.acceptor_eth_portion),
            expiry_unix: terms.expiry_date,
            expires_at: format_expiry(terms.expiry_date),
        }
    }
}

fn token_id_string(token_type: TokenType, id: U256) -> Option<String> {
    matches!(token_type, TokenType::Erc721 | TokenType::Erc1155).then(|| id.to_string())
}

/// Build the detail projection straight from a chain view, resolving each
/// leg's name and decimals through the cache-and-fallback discipline.
pub async fn project_detail<V: ChainView>(view: &V, terms: &SwapTerms) -> SwapDetailView {
    let initiator_leg =
        leg_metadata(view, terms.initiator_token_type, terms.initiator_erc_contract).await;
    let acceptor_leg =
        leg_metadata(view, terms.acceptor_token_type, terms.acceptor_erc_contract).await;
    SwapDetailView::project(terms, &initiator_leg, &acceptor_leg)
}

async fn leg_metadata<V: ChainView>(
    view: &V,
    token_type: TokenType,
    contract: Address,
) -> LegMetadata {
    if token_type.has_contract() {
        LegMetadata {
            name: view.token_name(contract).await,
            decimals: view.token_decimals(contract).await,
        }
    } else {
        LegMetadata {
            name: ETH_LABEL.to_string(),
            decimals: Some(ETH_DECIMALS),
        }
    }
}

/// Format a unix-seconds expiry as a UTC timestamp; a value outside chrono's
/// representable range falls back to the raw number.
fn format_expiry(expiry: u64) -> String {
    DateTime::from_timestamp(expiry as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| expiry.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    fn terms() -> SwapTerms {
        SwapTerms {
            swap_id: U256::from(12),
            initiator: address!("1111111111111111111111111111111111111111"),
            acceptor: address!("2222222222222222222222222222222222222222"),
            initiator_token_type: TokenType::Erc721,
            acceptor_token_type: TokenType::Erc20,
            initiator_erc_contract: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            acceptor_erc_contract: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            initiator_token_id: U256::from(77),
            acceptor_token_id: U256::ZERO,
            initiator_token_quantity: U256::from(1),
            acceptor_token_quantity: U256::from(2_500_000_000_000_000_000u128),
            initiator_eth_portion: U256::from(10_000_000_000_000_000u128),
            acceptor_eth_portion: U256::ZERO,
            expiry_date: 1_735_689_600, // 2025-01-01 00:00:00 UTC
        }
    }

    fn leg(name: &str, decimals: Option<u8>) -> LegMetadata {
        LegMetadata {
            name: name.to_string(),
            decimals,
        }
    }

    #[test]
    fn test_projection_scales_and_formats() {
        let view = SwapDetailView::project(&terms(), &leg("Cool Cats", None), &leg("DAI", Some(18)));

        assert_eq!(view.swap_id, "12");
        assert!(!view.is_open);
        assert_eq!(view.initiator_token_id.as_deref(), Some("77"));
        assert_eq!(view.acceptor_token_id, None);
        // ERC-721 quantity stays raw; ERC-20 scales by resolved decimals.
        assert_eq!(view.initiator_amount, "1");
        assert_eq!(view.acceptor_amount, "2.5");
        // ETH portions always scale by 18.
        assert_eq!(view.initiator_eth_portion, "0.01");
        assert_eq!(view.acceptor_eth_portion, "0");
        assert_eq!(view.expires_at, "2025-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_open_swap_has_no_acceptor() {
        let mut t = terms();
        t.acceptor = Address::ZERO;
        let view = SwapDetailView::project(&t, &leg("Cool Cats", None), &leg("DAI", Some(18)));
        assert!(view.is_open);
        assert_eq!(view.acceptor, None);
    }

    struct StubView;

    impl ChainView for StubView {
        async fn lifecycle_events(
            &self,
        ) -> Result<Vec<crate::types::LifecycleEvent>, crate::errors::EngineError> {
            Ok(Vec::new())
        }

        async fn swap_status(
            &self,
            _terms: &SwapTerms,
        ) -> Result<crate::types::SwapStatusFlags, crate::errors::EngineError> {
            Ok(Default::default())
        }

        async fn token_name(&self, _token: Address) -> String {
            "Stub Token".to_string()
        }

        async fn token_decimals(&self, _token: Address) -> Option<u8> {
            // Simulates a contract without a decimals() accessor.
            None
        }
    }

    #[tokio::test]
    async fn test_project_detail_degrades_unresolved_decimals() {
        let mut t = terms();
        t.acceptor_token_type = TokenType::Erc1155;
        t.acceptor_token_id = U256::from(5);
        let view = project_detail(&StubView, &t).await;

        assert_eq!(view.initiator_token_name, "Stub Token");
        // ERC-1155 with unresolved decimals renders the raw count.
        assert_eq!(view.acceptor_amount, "2500000000000000000");
        assert_eq!(view.acceptor_token_id.as_deref(), Some("5"));
    }
}
