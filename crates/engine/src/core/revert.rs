//! Maps terse on-chain rejection text to a human-readable explanation.
//!
//! Advisory only: the mapping never changes which actions are offered next.
//! Matching is case-insensitive substring search over a fixed table;
//! anything unrecognized gets one generic message.

/// Fallback for rejection text no table entry matches.
pub const UNKNOWN_ERROR: &str =
    "The transaction failed for an unrecognized reason. Nothing was transferred.";

/// Known failure substrings, checked in order. First match wins, so the
/// more specific escrow messages sit above the generic token-standard ones.
const KNOWN_FAILURES: &[(&str, &str)] = &[
    // Escrow-specific guards
    (
        "eth portion",
        "The attached ETH amount does not match the swap's ETH portion.",
    ),
    (
        "msg.value",
        "The attached ETH amount does not match the swap's ETH portion.",
    ),
    (
        "not acceptor",
        "Only the acceptor named in the swap can complete it.",
    ),
    (
        "not initiator",
        "Only the initiator of the swap can remove it.",
    ),
    (
        "nothing to withdraw",
        "There is no ETH balance to withdraw for this address.",
    ),
    (
        "zero address",
        "A required address was the zero address. Check the swap's terms.",
    ),
    // Token-standard errors
    (
        "insufficient allowance",
        "The token allowance is too low. Approve the token before completing the swap.",
    ),
    (
        "exceeds allowance",
        "The token allowance is too low. Approve the token before completing the swap.",
    ),
    (
        "not approved",
        "The token has not been approved for the escrow contract.",
    ),
    (
        "caller is not owner nor approved",
        "The token is not owned or approved by the expected party.",
    ),
    (
        "incorrect owner",
        "A party no longer owns the token specified in the swap.",
    ),
    (
        "insufficient balance",
        "A party no longer holds enough of the token specified in the swap.",
    ),
    // Environment / wallet
    (
        "reentrant",
        "The contract rejected a reentrant call. Wait for the pending transaction and retry.",
    ),
    (
        "out of gas",
        "The transaction ran out of gas. Retry with a higher gas limit.",
    ),
    (
        "user rejected",
        "The transaction was rejected in the wallet.",
    ),
    (
        "user denied",
        "The transaction was rejected in the wallet.",
    ),
];

/// Translate raw rejection text into one of the documented explanations.
pub fn explain_revert(raw: &str) -> &'static str {
    let haystack = raw.to_ascii_lowercase();
    for (needle, explanation) in KNOWN_FAILURES {
        if haystack.contains(needle) {
            return explanation;
        }
    }
    UNKNOWN_ERROR
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
