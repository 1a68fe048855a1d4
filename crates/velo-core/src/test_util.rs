//! Shared test helpers for `velo-core` unit tests.

use alloy::primitives::Address;

use crate::types::BikeRecord;

/// The registry contract address used across tests.
pub fn contract_address() -> Address {
    Address::repeat_byte(0xC0)
}

/// A deterministic owner address from a single distinguishing byte.
pub fn owner(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Build a `BikeRecord` for test fixtures.
pub fn record(owner: Address, brand: &str, registered_at: u64) -> BikeRecord {
    BikeRecord {
        owner,
        brand: brand.to_owned(),
        registered_at,
    }
}

