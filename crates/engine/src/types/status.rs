//! Classification output attached to every surfaced swap.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::swap::SwapTerms;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle readiness of a live swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapStatus {
    Ready,
    PartiallyReady,
    NotReady,
    /// A flag combination the contract did not classify, or a failed status
    /// query. Never actionable.
    Unknown,
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::PartiallyReady => "Partially Ready",
            Self::NotReady => "Not Ready",
            Self::Unknown => "Unknown",
        }
    }
}

/// Indicator dot rendered next to a swap. The terminal variants are assigned
/// by the categorizer, not the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusDot {
    Ready,
    Partial,
    NotReady,
    Unknown,
    Complete,
    Removed,
}

impl StatusDot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Partial => "partial",
            Self::NotReady => "not-ready",
            Self::Unknown => "unknown",
            Self::Complete => "complete",
            Self::Removed => "removed",
        }
    }
}

// ---------------------------------------------------------------------------
// Reason
// ---------------------------------------------------------------------------

/// Why a swap is (or is not) ready. `Display` yields the exact strings shown
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessReason {
    BothCannotSwap,
    InitiatorCannotSwap,
    AcceptorCannotSwap,
    BothMustApprove,
    InitiatorMustApprove,
    AcceptorMustApprove,
    WaitingForAcceptor,
    /// Unclassified / degraded — renders as an empty string.
    None,
}

impl ReadinessReason {
    /// Ownership failures gate every action except the initiator's removal.
    pub fn is_ownership_failure(self) -> bool {
        matches!(
            self,
            Self::BothCannotSwap | Self::InitiatorCannotSwap | Self::AcceptorCannotSwap
        )
    }

    /// The initiator's token still needs an approval.
    pub fn needs_initiator_approval(self) -> bool {
        matches!(self, Self::InitiatorMustApprove | Self::BothMustApprove)
    }

    /// The acceptor's token still needs an approval.
    pub fn needs_acceptor_approval(self) -> bool {
        matches!(self, Self::AcceptorMustApprove | Self::BothMustApprove)
    }
}

impl fmt::Display for ReadinessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BothCannotSwap => {
                "The initiator and acceptor do not own the tokens specified in the swap"
            }
            Self::InitiatorCannotSwap => "Initiator does not own the token specified in the swap",
            Self::AcceptorCannotSwap => "Acceptor does not own the token specified in the swap",
            Self::BothMustApprove => "Both parties must approve their tokens",
            Self::InitiatorMustApprove => "Initiator must approve token",
            Self::AcceptorMustApprove => "Acceptor must approve token",
            Self::WaitingForAcceptor => "Waiting for acceptor",
            Self::None => "",
        };
        f.write_str(text)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// One classification outcome: status, human reason, indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: SwapStatus,
    pub reason: ReadinessReason,
    pub dot: StatusDot,
}

impl Classification {
    pub fn new(status: SwapStatus, reason: ReadinessReason, dot: StatusDot) -> Self {
        Self { status, reason, dot }
    }

    /// Degraded sentinel for a failed or unclassifiable status query.
    pub fn unknown() -> Self {
        Self {
            status: SwapStatus::Unknown,
            reason: ReadinessReason::None,
            dot: StatusDot::Unknown,
        }
    }

    /// Terminal marker used by the categorizer for completed/removed swaps
    /// (no flags are ever queried for these).
    pub fn terminal(dot: StatusDot) -> Self {
        Self {
            status: SwapStatus::Unknown,
            reason: ReadinessReason::None,
            dot,
        }
    }
}

// ---------------------------------------------------------------------------
// Classified swap
// ---------------------------------------------------------------------------

/// A swap enriched with its classification and display names, ready for the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSwap {
    pub terms: SwapTerms,
    pub classification: Classification,
    /// Resolved name of the initiator-side token contract (or the ETH label).
    pub initiator_token_name: String,
    /// Resolved name of the acceptor-side token contract (or the ETH label).
    pub acceptor_token_name: String,
}
