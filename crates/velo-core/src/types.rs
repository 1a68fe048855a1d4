//! Domain types for the bike registry model.
//!
//! These are deliberately thin: a [`BikeRecord`] is the decoded result of one
//! `getBikeOwner` call and holds no lifecycle state of its own — the chain is
//! the source of truth and every lookup overwrites the previous view.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Records
// ==============================================================================

/// Ownership record for one registered bicycle, as returned by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeRecord {
    pub owner: Address,
    pub brand: String,
    /// Unix timestamp (seconds) of the registration block.
    pub registered_at: u64,
}

/// One decoded `BikeRegistered` event, with its log provenance when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub owner: Address,
    pub serial: String,
    pub brand: String,
    /// Unix timestamp (seconds) emitted by the contract.
    pub timestamp: u64,
    pub tx_hash: Option<B256>,
    pub block_number: Option<u64>,
}

// ==============================================================================
// Display Helpers
// ==============================================================================

/// Truncate a transaction hash for status lines: first 10 characters
/// (including the `0x` prefix) and the last 4.
pub fn short_hash(hash: &B256) -> String {
    truncate_hex(&hash.to_string(), 10)
}

/// Truncate an address for wallet display: first 8 characters and the last 4.
pub fn short_address(address: &Address) -> String {
    truncate_hex(&address.to_string(), 8)
}

fn truncate_hex(hex: &str, head: usize) -> String {
    // All inputs are `0x`-prefixed fixed-width hex, so both slices are
    // always in bounds and on character boundaries.
    format!("{}...{}", &hex[..head], &hex[hex.len() - 4..])
}

/// Format a raw on-chain balance as a decimal amount in the chain's native
/// currency, trimming trailing fractional zeros (`1500000000000000000` with
/// 18 decimals becomes `"1.5"`).
pub fn format_units(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let frac = value % divisor;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{frac:0>width$}", width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    format!("{whole}.{frac}")
}
