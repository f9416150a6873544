//! Runtime configuration for the watcher.
//!
//! Loads from environment variables with sensible defaults. Optionally
//! loads a JSON config file if `SWAPLENS_CONFIG_PATH` is set; env vars
//! override file values.

use alloy::primitives::Address;
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_METADATA_TIMEOUT_SECONDS, DEFAULT_POLL_INTERVAL_SECONDS,
    DEFAULT_STATUS_TIMEOUT_SECONDS,
};
use crate::errors::EngineError;

/// Runtime configuration for the swap watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// HTTP RPC endpoint for the chain hosting the escrow contract.
    pub rpc_http_url: String,
    /// Deployed TokenSwapper escrow contract address.
    pub escrow_address: String,
    /// Block the escrow was deployed at — lower bound for event queries.
    pub deploy_block: u64,
    /// Address whose buckets are computed. Optional at startup; the watcher
    /// idles until one is supplied.
    pub viewer_address: Option<String>,
    /// How often to re-categorize (seconds).
    pub poll_interval_seconds: u64,
    /// Timeout for one `getSwapStatus` call (seconds).
    pub status_timeout_seconds: u64,
    /// Timeout for one `name()`/`decimals()` call (seconds).
    pub metadata_timeout_seconds: u64,
    /// Directory for rolling log files.
    pub log_dir: String,
}

/// Optional JSON config overlay.
#[derive(Debug, Deserialize)]
struct JsonConfig {
    rpc_http_url: Option<String>,
    escrow_address: Option<String>,
    deploy_block: Option<u64>,
    viewer_address: Option<String>,
    poll_interval_seconds: Option<u64>,
    status_timeout_seconds: Option<u64>,
    metadata_timeout_seconds: Option<u64>,
    log_dir: Option<String>,
}

impl WatchConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// If `SWAPLENS_CONFIG_PATH` is set, loads a JSON file first and overlays
    /// environment variables on top. Validates before returning.
    pub fn from_env() -> Result<Self> {
        let json_cfg = match std::env::var("SWAPLENS_CONFIG_PATH").ok() {
            Some(path) if !path.is_empty() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file: {path}"))?;
                Some(
                    serde_json::from_str::<JsonConfig>(&contents)
                        .with_context(|| format!("failed to parse config file: {path}"))?,
                )
            }
            _ => None,
        };

        let rpc_http_url = env_string("SWAPLENS_RPC_URL")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.rpc_http_url.clone()))
            .unwrap_or_default();

        let escrow_address = env_string("SWAPLENS_ESCROW_ADDRESS")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.escrow_address.clone()))
            .unwrap_or_default();

        let deploy_block = env_parse("SWAPLENS_DEPLOY_BLOCK")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.deploy_block))
            .unwrap_or(0);

        let viewer_address = env_string("SWAPLENS_VIEWER")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.viewer_address.clone()));

        let poll_interval_seconds = env_parse("SWAPLENS_POLL_INTERVAL")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.poll_interval_seconds))
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS);

        let status_timeout_seconds = env_parse("SWAPLENS_STATUS_TIMEOUT")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.status_timeout_seconds))
            .unwrap_or(DEFAULT_STATUS_TIMEOUT_SECONDS);

        let metadata_timeout_seconds = env_parse("SWAPLENS_METADATA_TIMEOUT")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.metadata_timeout_seconds))
            .unwrap_or(DEFAULT_METADATA_TIMEOUT_SECONDS);

        let log_dir = env_string("SWAPLENS_LOG_DIR")
            .or_else(|| json_cfg.as_ref().and_then(|c| c.log_dir.clone()))
            .unwrap_or_else(|| "logs".to_string());

        let config = Self {
            rpc_http_url,
            escrow_address,
            deploy_block,
            viewer_address,
            poll_interval_seconds,
            status_timeout_seconds,
            metadata_timeout_seconds,
            log_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate field shapes: parseable URL and addresses, sane intervals.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.rpc_http_url
            .parse::<Url>()
            .map_err(|e| EngineError::Config(format!("invalid RPC URL: {e}")))?;

        let escrow = self.escrow()?;
        if escrow == Address::ZERO {
            return Err(EngineError::Config(
                "escrow address must not be the zero address".to_string(),
            ));
        }

        self.viewer()?;

        if self.poll_interval_seconds == 0 {
            return Err(EngineError::Config(
                "poll interval must be at least 1 second".to_string(),
            ));
        }
        if self.status_timeout_seconds == 0 || self.metadata_timeout_seconds == 0 {
            return Err(EngineError::Config(
                "timeouts must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn escrow(&self) -> Result<Address, EngineError> {
        self.escrow_address
            .parse()
            .map_err(|e| EngineError::Config(format!("invalid escrow address: {e}")))
    }

    pub fn viewer(&self) -> Result<Option<Address>, EngineError> {
        match &self.viewer_address {
            Some(raw) if !raw.is_empty() => raw
                .parse()
                .map(Some)
                .map_err(|e| EngineError::Config(format!("invalid viewer address: {e}"))),
            _ => Ok(None),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable into a type that implements `FromStr`.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> WatchConfig {
        WatchConfig {
            rpc_http_url: "https://rpc.sepolia.org".to_string(),
            escrow_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            deploy_block: 4_000_000,
            viewer_address: Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string()),
            poll_interval_seconds: 5,
            status_timeout_seconds: 5,
            metadata_timeout_seconds: 3,
            log_dir: "logs".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
        assert!(valid().viewer().unwrap().is_some());
    }

    #[test]
    fn test_rejects_malformed_rpc_url() {
        let mut config = valid();
        config.rpc_http_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_escrow_address() {
        let mut config = valid();
        config.escrow_address = "0x0000000000000000000000000000000000000000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let mut config = valid();
        config.poll_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_viewer_is_allowed() {
        let mut config = valid();
        config.viewer_address = None;
        assert!(config.validate().is_ok());
        assert!(config.viewer().unwrap().is_none());
    }
}
