//! Swap terms and readiness flags as persisted on the escrow contract.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

// ---------------------------------------------------------------------------
// Token type
// ---------------------------------------------------------------------------

/// Kind of asset on one leg of a swap.
///
/// Canonical encoding is the contract-side 5-value map: `None = 0`,
/// `Erc20 = 1`, `Erc777 = 2`, `Erc721 = 3`, `Erc1155 = 4`. A native-ETH leg
/// is `None` with a non-zero ETH portion. The legacy UI-side map that put
/// ETH at index 0 folds into this one the same way (ETH → `None` + portion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    None,
    Erc20,
    Erc777,
    Erc721,
    Erc1155,
}

impl TokenType {
    /// Decode the on-chain `uint8` encoding. Out-of-range values are rejected
    /// at the boundary rather than propagated into classification logic.
    pub fn from_u8(raw: u8) -> Result<Self, EngineError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Erc20),
            2 => Ok(Self::Erc777),
            3 => Ok(Self::Erc721),
            4 => Ok(Self::Erc1155),
            other => Err(EngineError::InvalidTokenType(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Erc20 => 1,
            Self::Erc777 => 2,
            Self::Erc721 => 3,
            Self::Erc1155 => 4,
        }
    }

    /// Whether this leg references an ERC contract at all.
    pub fn has_contract(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether amounts of this token are scaled by a `decimals()` value.
    pub fn is_fungible(self) -> bool {
        matches!(self, Self::Erc20 | Self::Erc777)
    }
}

// ---------------------------------------------------------------------------
// Viewer role
// ---------------------------------------------------------------------------

/// Relationship of the viewing address to a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Initiator,
    Acceptor,
    /// Not a named party — e.g. a browser of open swaps.
    Observer,
}

// ---------------------------------------------------------------------------
// Swap terms
// ---------------------------------------------------------------------------

/// The immutable terms of a swap as recorded by the escrow contract at
/// initiation. Only contract state transitions ever change a swap; the
/// client treats this struct as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTerms {
    /// Identifier assigned by the contract at creation.
    pub swap_id: U256,
    pub initiator: Address,
    /// `Address::ZERO` means the swap is open to any acceptor.
    pub acceptor: Address,
    pub initiator_token_type: TokenType,
    pub acceptor_token_type: TokenType,
    /// Meaningless when the matching token type is `None`.
    pub initiator_erc_contract: Address,
    pub acceptor_erc_contract: Address,
    pub initiator_token_id: U256,
    pub acceptor_token_id: U256,
    pub initiator_token_quantity: U256,
    pub acceptor_token_quantity: U256,
    /// Wei attached by the initiator at creation.
    pub initiator_eth_portion: U256,
    /// Wei the acceptor must attach to complete.
    pub acceptor_eth_portion: U256,
    /// Unix seconds; the swap is expired once `expiry_date <= now`.
    pub expiry_date: u64,
}

impl SwapTerms {
    /// An open swap has no bound acceptor.
    pub fn is_open(&self) -> bool {
        self.acceptor == Address::ZERO
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry_date <= now
    }

    pub fn role_of(&self, viewer: Address) -> ViewerRole {
        if viewer == self.initiator {
            ViewerRole::Initiator
        } else if !self.is_open() && viewer == self.acceptor {
            ViewerRole::Acceptor
        } else {
            ViewerRole::Observer
        }
    }

    /// Whether the viewer is a named party (initiator or bound acceptor).
    pub fn is_party(&self, viewer: Address) -> bool {
        viewer == self.initiator || (!self.is_open() && viewer == self.acceptor)
    }
}

// ---------------------------------------------------------------------------
// Readiness flags
// ---------------------------------------------------------------------------

/// Live readiness predicates from `getSwapStatus`.
///
/// Valid only at query time — ownership and approvals can change between
/// polls, so these are fetched fresh for every classification and never
/// cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapStatusFlags {
    pub initiator_needs_to_own_token: bool,
    pub acceptor_needs_to_own_token: bool,
    pub initiator_token_requires_approval: bool,
    pub acceptor_token_requires_approval: bool,
    pub is_ready_for_swapping: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_token_type_round_trip() {
        for raw in 0u8..=4 {
            let tt = TokenType::from_u8(raw).unwrap();
            assert_eq!(tt.as_u8(), raw);
        }
        assert!(TokenType::from_u8(5).is_err());
        assert!(TokenType::from_u8(255).is_err());
    }

    #[test]
    fn test_role_of_open_swap_never_acceptor() {
        let terms = SwapTerms {
            swap_id: U256::from(1),
            initiator: address!("1111111111111111111111111111111111111111"),
            acceptor: Address::ZERO,
            initiator_token_type: TokenType::Erc20,
            acceptor_token_type: TokenType::None,
            initiator_erc_contract: address!("2222222222222222222222222222222222222222"),
            acceptor_erc_contract: Address::ZERO,
            initiator_token_id: U256::ZERO,
            acceptor_token_id: U256::ZERO,
            initiator_token_quantity: U256::from(100),
            acceptor_token_quantity: U256::ZERO,
            initiator_eth_portion: U256::ZERO,
            acceptor_eth_portion: U256::from(1),
            expiry_date: 2_000_000_000,
        };

        assert!(terms.is_open());
        // The zero address itself must not read as a bound acceptor.
        assert_eq!(terms.role_of(Address::ZERO), ViewerRole::Observer);
        assert_eq!(terms.role_of(terms.initiator), ViewerRole::Initiator);
        assert!(!terms.is_party(Address::ZERO));
    }

    #[test]
    fn test_expiry_boundary_inclusive() {
        let mut terms = SwapTerms {
            swap_id: U256::from(7),
            initiator: address!("1111111111111111111111111111111111111111"),
            acceptor: address!("3333333333333333333333333333333333333333"),
            initiator_token_type: TokenType::Erc721,
            acceptor_token_type: TokenType::Erc20,
            initiator_erc_contract: address!("2222222222222222222222222222222222222222"),
            acceptor_erc_contract: address!("4444444444444444444444444444444444444444"),
            initiator_token_id: U256::from(42),
            acceptor_token_id: U256::ZERO,
            initiator_token_quantity: U256::ZERO,
            acceptor_token_quantity: U256::from(500),
            initiator_eth_portion: U256::ZERO,
            acceptor_eth_portion: U256::ZERO,
            expiry_date: 1_000,
        };

        assert!(terms.is_expired(1_000));
        assert!(terms.is_expired(1_001));
        terms.expiry_date = 1_002;
        assert!(!terms.is_expired(1_001));
    }
}
