// ---------------------------------------------------------------------------
// Token display
// ---------------------------------------------------------------------------

/// Decimals assumed for ERC-20/777 tokens whose `decimals()` query failed.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Decimals of the native currency (wei per ETH).
pub const ETH_DECIMALS: u8 = 18;

/// Display label for the zero address / native currency.
pub const ETH_LABEL: &str = "ETH";

/// Sentinel label for a token contract whose `name()` query failed.
/// Cached permanently so a known-bad address is never queried twice.
pub const NAME_UNKNOWN_LABEL: &str = "Name Unknown";

// ---------------------------------------------------------------------------
// Timing defaults
// ---------------------------------------------------------------------------

/// How often the watcher re-categorizes the full event history.
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;

/// Timeout for a single `getSwapStatus` call.
pub const DEFAULT_STATUS_TIMEOUT_SECONDS: u64 = 5;

/// Timeout for a single `name()` / `decimals()` metadata call.
pub const DEFAULT_METADATA_TIMEOUT_SECONDS: u64 = 3;
