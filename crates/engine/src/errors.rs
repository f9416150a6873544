use thiserror::Error;

/// Typed error hierarchy for the swaplens engine.
///
/// Library-internal errors use specific variants; application code wraps with
/// `anyhow::Context` for propagation. Per-swap and per-address failures are
/// swallowed at their origin and degrade to sentinel values — only whole-run
/// failures (event-log fetch, config) surface as errors.
#[derive(Error, Debug)]
pub enum EngineError {
    // -- Chain reads --------------------------------------------------------
    #[error("getSwapStatus failed for swap {swap_id}: {reason}")]
    StatusQuery { swap_id: String, reason: String },

    #[error("event log fetch failed: {reason}")]
    EventFetch { reason: String },

    #[error("malformed lifecycle event: {reason}")]
    MalformedEvent { reason: String },

    // -- Decoding -----------------------------------------------------------
    #[error("unknown token type encoding: {0}")]
    InvalidTokenType(u8),

    // -- Configuration ------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),

    // -- Forwarded errors ---------------------------------------------------
    #[error(transparent)]
    Alloy(#[from] alloy::transports::TransportError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
