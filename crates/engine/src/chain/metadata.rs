//! Process-wide token metadata cache (names and decimals).
//!
//! A permanent memoization for the lifetime of the running client: no
//! expiry, no invalidation beyond an explicit [`clear`](TokenMetadataCache::clear).
//! Failed lookups are cached too, as sentinels, so a known-bad address is
//! never queried twice. Racing lookups for the same address may duplicate
//! work; writes are idempotent and converge to a stable value.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;

/// Thread-safe cache of token display metadata, keyed by contract address.
///
/// `names` maps to the resolved `name()` string (or the "Name Unknown"
/// sentinel). `decimals` maps to `Some(n)` for a resolved `decimals()` call
/// and `None` for a cached negative result.
#[derive(Debug, Clone, Default)]
pub struct TokenMetadataCache {
    names: Arc<Mutex<HashMap<Address, String>>>,
    decimals: Arc<Mutex<HashMap<Address, Option<u8>>>>,
}

impl TokenMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self, token: Address) -> Option<String> {
        self.names
            .lock()
            .expect("metadata cache lock poisoned")
            .get(&token)
            .cloned()
    }

    pub fn store_name(&self, token: Address, name: String) {
        self.names
            .lock()
            .expect("metadata cache lock poisoned")
            .insert(token, name);
    }

    /// Outer `None` = never looked up; `Some(None)` = cached lookup failure.
    pub fn decimals(&self, token: Address) -> Option<Option<u8>> {
        self.decimals
            .lock()
            .expect("metadata cache lock poisoned")
            .get(&token)
            .copied()
    }

    pub fn store_decimals(&self, token: Address, value: Option<u8>) {
        self.decimals
            .lock()
            .expect("metadata cache lock poisoned")
            .insert(token, value);
    }

    /// Drop every cached entry. Subsequent lookups hit the network again.
    pub fn clear(&self) {
        self.names
            .lock()
            .expect("metadata cache lock poisoned")
            .clear();
        self.decimals
            .lock()
            .expect("metadata cache lock poisoned")
            .clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
