//! Advisory action descriptors resolved for the current viewer.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// The on-chain operation an action stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapAction {
    /// `approve` / `setApprovalForAll` on a token contract.
    ApproveToken,
    /// `completeSwap` on the escrow contract.
    CompleteSwap,
    /// `removeSwap` on the escrow contract.
    RemoveSwap,
}

impl SwapAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ApproveToken => "Approve Token",
            Self::CompleteSwap => "Complete Swap",
            Self::RemoveSwap => "Remove Swap",
        }
    }
}

/// One permitted next step for the viewer. Purely advisory — the
/// presentation layer performs the actual contract call against `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSpec {
    pub action: SwapAction,
    pub label: &'static str,
    /// Contract the call must be sent to: a token contract for approvals,
    /// the escrow contract for complete/remove.
    pub target: Address,
    /// Rendered greyed-out; set when the action's target leg carries no ERC
    /// contract (pure-ETH leg).
    pub disabled: bool,
}

impl ActionSpec {
    pub fn new(action: SwapAction, target: Address) -> Self {
        Self {
            action,
            label: action.label(),
            target,
            disabled: false,
        }
    }

    pub fn disabled(action: SwapAction, target: Address) -> Self {
        Self {
            action,
            label: action.label(),
            target,
            disabled: true,
        }
    }
}
