//! Lifecycle events decoded from the escrow contract's log history.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::types::swap::SwapTerms;

/// Position of an event in the chain — the chronological ordering cue used
/// when two terminal events claim the same swap id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventPosition {
    pub block_number: u64,
    pub log_index: u64,
}

/// One decoded lifecycle event. Payload shapes are fixed per variant; logs
/// that do not decode into one of these are rejected at the chain boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// A new swap was created; carries the full persisted terms.
    Initiated {
        swap_id: U256,
        terms: SwapTerms,
        position: EventPosition,
    },
    /// The swap settled — both legs transferred.
    Completed { swap_id: U256, position: EventPosition },
    /// The initiator withdrew the swap before acceptance.
    Removed { swap_id: U256, position: EventPosition },
}

impl LifecycleEvent {
    pub fn swap_id(&self) -> U256 {
        match self {
            Self::Initiated { swap_id, .. }
            | Self::Completed { swap_id, .. }
            | Self::Removed { swap_id, .. } => *swap_id,
        }
    }

    pub fn position(&self) -> EventPosition {
        match self {
            Self::Initiated { position, .. }
            | Self::Completed { position, .. }
            | Self::Removed { position, .. } => *position,
        }
    }
}
