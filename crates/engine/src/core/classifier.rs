//! Swap readiness classification from live contract flags.
//!
//! Pure functions of their inputs — flags must be freshly queried and no
//! state is held here. Multiple flags can be true at once, so rule order is
//! the contract: the first matching rule wins.

use crate::types::{
    Classification, ReadinessReason, StatusDot, SwapStatus, SwapStatusFlags, SwapTerms,
};

/// Classify a swap from its persisted terms and freshly queried flags.
///
/// Open swaps (no bound acceptor) are judged on the initiator-side flags
/// only — there is no acceptor whose ownership or approvals could gate
/// anything yet.
pub fn classify(terms: &SwapTerms, flags: &SwapStatusFlags) -> Classification {
    if terms.is_open() {
        return classify_initiator_only(flags);
    }

    // Targeted swap. Ownership failures outrank approval failures, and
    // both-sides failures outrank single-side ones.
    if flags.initiator_needs_to_own_token && flags.acceptor_needs_to_own_token {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::BothCannotSwap,
            StatusDot::NotReady,
        );
    }
    if flags.initiator_needs_to_own_token {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::InitiatorCannotSwap,
            StatusDot::NotReady,
        );
    }
    if flags.acceptor_needs_to_own_token {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::AcceptorCannotSwap,
            StatusDot::NotReady,
        );
    }
    if flags.initiator_token_requires_approval && flags.acceptor_token_requires_approval {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::BothMustApprove,
            StatusDot::NotReady,
        );
    }
    if flags.initiator_token_requires_approval {
        return Classification::new(
            SwapStatus::PartiallyReady,
            ReadinessReason::InitiatorMustApprove,
            StatusDot::Partial,
        );
    }
    if flags.acceptor_token_requires_approval {
        return Classification::new(
            SwapStatus::PartiallyReady,
            ReadinessReason::AcceptorMustApprove,
            StatusDot::Partial,
        );
    }
    if flags.is_ready_for_swapping {
        return Classification::new(
            SwapStatus::Ready,
            ReadinessReason::WaitingForAcceptor,
            StatusDot::Ready,
        );
    }

    // A flag combination the contract did not classify. Never actionable.
    Classification::unknown()
}

/// Reduced classification using only the initiator-side flags.
///
/// Used for open swaps: reports Not Ready (ownership, then approval) or
/// Ready, never Partially Ready and never an acceptor-side reason.
pub fn classify_initiator_only(flags: &SwapStatusFlags) -> Classification {
    if flags.initiator_needs_to_own_token {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::InitiatorCannotSwap,
            StatusDot::NotReady,
        );
    }
    if flags.initiator_token_requires_approval {
        return Classification::new(
            SwapStatus::NotReady,
            ReadinessReason::InitiatorMustApprove,
            StatusDot::NotReady,
        );
    }
    Classification::new(
        SwapStatus::Ready,
        ReadinessReason::WaitingForAcceptor,
        StatusDot::Ready,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Address, U256};
    use crate::types::TokenType;

    fn targeted_terms() -> SwapTerms {
        SwapTerms {
            swap_id: U256::from(1),
            initiator: address!("1111111111111111111111111111111111111111"),
            acceptor: address!("2222222222222222222222222222222222222222"),
            initiator_token_type: TokenType::Erc721,
            acceptor_token_type: TokenType::Erc20,
            initiator_erc_contract: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            acceptor_erc_contract: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            initiator_token_id: U256::from(7),
            acceptor_token_id: U256::ZERO,
            initiator_token_quantity: U256::ZERO,
            acceptor_token_quantity: U256::from(1_000),
            initiator_eth_portion: U256::ZERO,
            acceptor_eth_portion: U256::ZERO,
            expiry_date: u64::MAX,
        }
    }

    fn open_terms() -> SwapTerms {
        let mut terms = targeted_terms();
        terms.acceptor = Address::ZERO;
        terms
    }

    fn flags(
        i_own: bool,
        a_own: bool,
        i_appr: bool,
        a_appr: bool,
        ready: bool,
    ) -> SwapStatusFlags {
        SwapStatusFlags {
            initiator_needs_to_own_token: i_own,
            acceptor_needs_to_own_token: a_own,
            initiator_token_requires_approval: i_appr,
            acceptor_token_requires_approval: a_appr,
            is_ready_for_swapping: ready,
        }
    }

    #[test]
    fn test_targeted_precedence_table() {
        let terms = targeted_terms();
        let cases: &[(SwapStatusFlags, SwapStatus, ReadinessReason)] = &[
            (
                flags(true, true, false, false, false),
                SwapStatus::NotReady,
                ReadinessReason::BothCannotSwap,
            ),
            (
                flags(true, false, false, false, false),
                SwapStatus::NotReady,
                ReadinessReason::InitiatorCannotSwap,
            ),
            (
                flags(false, true, false, false, false),
                SwapStatus::NotReady,
                ReadinessReason::AcceptorCannotSwap,
            ),
            (
                flags(false, false, true, true, false),
                SwapStatus::NotReady,
                ReadinessReason::BothMustApprove,
            ),
            (
                flags(false, false, true, false, false),
                SwapStatus::PartiallyReady,
                ReadinessReason::InitiatorMustApprove,
            ),
            (
                flags(false, false, false, true, false),
                SwapStatus::PartiallyReady,
                ReadinessReason::AcceptorMustApprove,
            ),
            (
                flags(false, false, false, false, true),
                SwapStatus::Ready,
                ReadinessReason::WaitingForAcceptor,
            ),
            (
                flags(false, false, false, false, false),
                SwapStatus::Unknown,
                ReadinessReason::None,
            ),
        ];

        for (f, status, reason) in cases {
            let c = classify(&terms, f);
            assert_eq!(c.status, *status, "flags: {f:?}");
            assert_eq!(c.reason, *reason, "flags: {f:?}");
        }
    }

    #[test]
    fn test_ownership_beats_approval() {
        // Both-ownership-missing wins even with every other flag raised.
        let c = classify(&targeted_terms(), &flags(true, true, true, true, true));
        assert_eq!(c.reason, ReadinessReason::BothCannotSwap);

        // Single ownership failure still outranks both approvals.
        let c = classify(&targeted_terms(), &flags(false, true, true, true, false));
        assert_eq!(c.reason, ReadinessReason::AcceptorCannotSwap);
    }

    #[test]
    fn test_exhaustive_targeted_outcomes_are_documented() {
        // Every one of the 32 flag combinations must land on one of the nine
        // documented outcomes — nothing panics, nothing falls outside.
        let terms = targeted_terms();
        for bits in 0u8..32 {
            let f = flags(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            );
            let c = classify(&terms, &f);
            match (c.status, c.reason) {
                (SwapStatus::NotReady, ReadinessReason::BothCannotSwap)
                | (SwapStatus::NotReady, ReadinessReason::InitiatorCannotSwap)
                | (SwapStatus::NotReady, ReadinessReason::AcceptorCannotSwap)
                | (SwapStatus::NotReady, ReadinessReason::BothMustApprove)
                | (SwapStatus::PartiallyReady, ReadinessReason::InitiatorMustApprove)
                | (SwapStatus::PartiallyReady, ReadinessReason::AcceptorMustApprove)
                | (SwapStatus::Ready, ReadinessReason::WaitingForAcceptor)
                | (SwapStatus::Unknown, ReadinessReason::None) => {}
                other => panic!("undocumented outcome {other:?} for flags {f:?}"),
            }
        }
    }

    #[test]
    fn test_open_swap_ignores_acceptor_flags() {
        let terms = open_terms();
        // Acceptor-side flags raised but irrelevant: still Ready.
        let c = classify(&terms, &flags(false, true, false, true, false));
        assert_eq!(c.status, SwapStatus::Ready);
        assert_eq!(c.reason, ReadinessReason::WaitingForAcceptor);
    }

    #[test]
    fn test_open_swap_never_partially_ready() {
        let terms = open_terms();
        for bits in 0u8..32 {
            let f = flags(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            );
            let c = classify(&terms, &f);
            assert_ne!(c.status, SwapStatus::PartiallyReady, "flags: {f:?}");
            assert_ne!(c.reason, ReadinessReason::AcceptorCannotSwap);
            assert_ne!(c.reason, ReadinessReason::AcceptorMustApprove);
        }
    }

    #[test]
    fn test_initiator_only_precedence() {
        let c = classify_initiator_only(&flags(true, false, true, false, false));
        assert_eq!(c.status, SwapStatus::NotReady);
        assert_eq!(c.reason, ReadinessReason::InitiatorCannotSwap);

        let c = classify_initiator_only(&flags(false, false, true, false, false));
        assert_eq!(c.status, SwapStatus::NotReady);
        assert_eq!(c.reason, ReadinessReason::InitiatorMustApprove);

        let c = classify_initiator_only(&flags(false, false, false, false, true));
        assert_eq!(c.status, SwapStatus::Ready);
        assert_eq!(c.reason, ReadinessReason::WaitingForAcceptor);
    }
}
