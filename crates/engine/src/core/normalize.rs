//! Token/value display normalization.
//!
//! Converts raw on-chain integers into human-readable decimal strings.
//! All scaling is exact integer arithmetic on `U256` — amounts can exceed
//! any fixed-precision decimal type, so nothing here goes through floats.

use alloy::primitives::U256;

use crate::constants::{DEFAULT_TOKEN_DECIMALS, ETH_DECIMALS};
use crate::types::TokenType;

/// Scale `raw` down by `decimals` and render as a decimal string with
/// trailing zero fraction digits stripped (`1.50000` → `1.5`, `2.0` → `2`).
pub fn format_units(raw: U256, decimals: u8) -> String {
    if raw.is_zero() {
        return "0".to_string();
    }
    if decimals == 0 {
        return raw.to_string();
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = raw / scale;
    let frac = raw % scale;

    if frac.is_zero() {
        return whole.to_string();
    }

    let mut frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

/// Render a token quantity for display.
///
/// - ERC-20/777 amounts scale by the resolved `decimals()` (default 18 when
///   the lookup failed).
/// - ERC-1155 balances are atomic counts unless the contract actually
///   resolved a decimals value, so an unresolved lookup leaves the raw
///   integer untouched.
/// - ERC-721 ids/quantities and bare-ETH legs are never scaled here.
pub fn display_amount(token_type: TokenType, raw: U256, resolved_decimals: Option<u8>) -> String {
    match token_type {
        TokenType::Erc20 | TokenType::Erc777 => {
            format_units(raw, resolved_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS))
        }
        TokenType::Erc1155 => match resolved_decimals {
            Some(decimals) => format_units(raw, decimals),
            None => raw.to_string(),
        },
        TokenType::Erc721 | TokenType::None => raw.to_string(),
    }
}

/// Render a wei amount as ETH. Always 18 decimals, regardless of what the
/// swap's token legs are.
pub fn format_eth(raw: U256) -> String {
    format_units(raw, ETH_DECIMALS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
