//! Swaplens engine — read-side decision logic for the TokenSwapper escrow
//! contract.
//!
//! Pulls historical swap lifecycle events and live readiness flags from the
//! escrow contract, classifies each swap, sorts swaps into per-viewer display
//! buckets, and resolves which on-chain actions the viewer may take next.
//! The engine never signs or submits transactions — it is the advisory layer
//! a wallet-connected UI renders from.

pub mod chain;
pub mod config;
pub mod constants;
pub mod core;
pub mod errors;
pub mod logging;
pub mod types;
