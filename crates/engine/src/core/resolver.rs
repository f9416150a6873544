//! Resolves the set of permitted next actions for a viewer and swap.
//!
//! A single flat decision table over `(openness, role, status, reason)`
//! replaces nested conditionals: every case is independently testable and a
//! combination no rule covers is logged instead of falling through silently.
//! Purely advisory — the presentation layer performs the actual calls.

use alloy::primitives::Address;
use tracing::warn;

use crate::types::{
    ActionSpec, ClassifiedSwap, ReadinessReason, StatusDot, SwapAction, SwapStatus, SwapTerms,
    ViewerRole,
};

/// Resolve the ordered action list for `viewer` on `swap`.
///
/// Expired swaps, Unknown-status swaps, and terminal (completed/removed)
/// swaps never yield actions — a button must never be backed by a stale or
/// indeterminate on-chain state.
pub fn resolve_actions(
    swap: &ClassifiedSwap,
    viewer: Address,
    escrow: Address,
    now: u64,
) -> Vec<ActionSpec> {
    let terms = &swap.terms;
    let c = &swap.classification;

    if terms.is_expired(now) {
        return Vec::new();
    }
    if matches!(c.dot, StatusDot::Complete | StatusDot::Removed) {
        return Vec::new();
    }
    if c.status == SwapStatus::Unknown {
        return Vec::new();
    }

    let role = terms.role_of(viewer);
    let remove = ActionSpec::new(SwapAction::RemoveSwap, escrow);
    let complete = ActionSpec::new(SwapAction::CompleteSwap, escrow);

    use ReadinessReason as R;
    use SwapStatus as S;
    use ViewerRole as V;

    match (terms.is_open(), role, c.status, c.reason) {
        // -- Open swap, viewer is the initiator -----------------------------
        (true, V::Initiator, _, R::InitiatorMustApprove) => {
            vec![approve_initiator_side(terms)]
        }
        (true, V::Initiator, _, _) => vec![remove],

        // -- Open swap, any other viewer (a would-be acceptor) --------------
        // Nothing to do against an initiator who no longer owns the token.
        (true, _, _, r) if r.is_ownership_failure() => Vec::new(),
        (true, _, S::Ready, _) => vec![approve_acceptor_side(terms), complete],
        (true, _, _, _) => vec![approve_acceptor_side(terms)],

        // -- Targeted swap, ownership failure -------------------------------
        // Only the initiator can act on a broken swap, and only to cancel it.
        (false, V::Initiator, _, r) if r.is_ownership_failure() => vec![remove],
        (false, _, _, r) if r.is_ownership_failure() => Vec::new(),

        // -- Targeted swap, viewer is the initiator -------------------------
        (false, V::Initiator, S::NotReady, R::BothMustApprove)
        | (false, V::Initiator, S::PartiallyReady, R::InitiatorMustApprove) => {
            vec![approve_initiator_side(terms), remove]
        }
        // The initiator may always cancel while unaccepted.
        (false, V::Initiator, S::PartiallyReady, R::AcceptorMustApprove)
        | (false, V::Initiator, S::Ready, _) => vec![remove],

        // -- Targeted swap, viewer is the acceptor --------------------------
        // Pre-approve the initiator's side in anticipation.
        (false, V::Acceptor, _, R::InitiatorMustApprove) => {
            vec![ActionSpec::new(
                SwapAction::ApproveToken,
                terms.initiator_erc_contract,
            )]
        }
        (false, V::Acceptor, _, R::AcceptorMustApprove)
        | (false, V::Acceptor, S::NotReady, R::BothMustApprove) => {
            vec![approve_acceptor_side(terms)]
        }
        (false, V::Acceptor, S::Ready, _) => vec![complete],

        // -- Targeted swap, unrelated observer ------------------------------
        (false, V::Observer, _, _) => Vec::new(),

        // -- No matching rule ----------------------------------------------
        (open, role, status, reason) => {
            warn!(
                swap_id = %terms.swap_id,
                open,
                ?role,
                ?status,
                ?reason,
                "no action rule matched; offering none"
            );
            Vec::new()
        }
    }
}

/// Approve action for the initiator's token contract. Emitted disabled when
/// that leg has no ERC contract to approve (pure-ETH leg).
fn approve_initiator_side(terms: &SwapTerms) -> ActionSpec {
    if terms.initiator_token_type.has_contract() {
        ActionSpec::new(SwapAction::ApproveToken, terms.initiator_erc_contract)
    } else {
        ActionSpec::disabled(SwapAction::ApproveToken, terms.initiator_erc_contract)
    }
}

fn approve_acceptor_side(terms: &SwapTerms) -> ActionSpec {
    if terms.acceptor_token_type.has_contract() {
        ActionSpec::new(SwapAction::ApproveToken, terms.acceptor_erc_contract)
    } else {
        ActionSpec::disabled(SwapAction::ApproveToken, terms.acceptor_erc_contract)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
