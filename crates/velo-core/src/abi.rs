//! Bike registry contract bindings.
//!
//! This is the only bit-exact external surface of the client: two callable
//! functions and one event, encoded per the Solidity ABI. Encoding and
//! decoding delegate to `alloy`'s `sol!` bindings — we intentionally avoid
//! reimplementing ABI codec rules.

use alloy::primitives::{Address, Bytes, B256};
use alloy::sol;
use alloy::sol_types::{Revert, SolCall, SolError, SolEvent};

use crate::error::CoreError;
use crate::rpc::types::LogEntry;
use crate::types::{BikeRecord, RegistrationEvent};

sol! {
    /// On-chain interface of the bike registry contract.
    interface IBikeRegistry {
        event BikeRegistered(address indexed owner, string serial, string brand, uint256 timestamp);

        function registerBike(string serial, string brand);

        function getBikeOwner(string serial)
            returns (address owner, string brand, uint256 registeredAt);
    }
}

// ==============================================================================
// Call Data
// ==============================================================================

/// Calldata for `registerBike(serial, brand)`.
pub fn register_call_data(serial: &str, brand: &str) -> Bytes {
    IBikeRegistry::registerBikeCall {
        serial: serial.to_owned(),
        brand: brand.to_owned(),
    }
    .abi_encode()
    .into()
}

/// Calldata for `getBikeOwner(serial)`.
pub fn owner_query_call_data(serial: &str) -> Bytes {
    IBikeRegistry::getBikeOwnerCall {
        serial: serial.to_owned(),
    }
    .abi_encode()
    .into()
}

/// Decode the `getBikeOwner` return tuple into a [`BikeRecord`].
pub fn decode_owner_reply(data: &[u8]) -> Result<BikeRecord, CoreError> {
    let reply = IBikeRegistry::getBikeOwnerCall::abi_decode_returns(data)
        .map_err(|e| CoreError::InvalidResponseData(format!("decode getBikeOwner return: {e}")))?;

    let registered_at = u64::try_from(reply.registeredAt).map_err(|_| {
        CoreError::InvalidResponseData(format!(
            "registeredAt {} does not fit a unix timestamp",
            reply.registeredAt
        ))
    })?;

    Ok(BikeRecord {
        owner: reply.owner,
        brand: reply.brand,
        registered_at,
    })
}

// ==============================================================================
// Revert Reasons
// ==============================================================================

/// Decode a standard Solidity `Error(string)` revert payload
/// (selector `0x08c379a0`). Returns `None` for empty or custom-error data.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    Revert::abi_decode(data).ok().map(|revert| revert.reason)
}

// ==============================================================================
// BikeRegistered Event
// ==============================================================================

/// topic0 of the `BikeRegistered` event.
pub fn registration_topic() -> B256 {
    IBikeRegistry::BikeRegistered::SIGNATURE_HASH
}

/// topic1 value for filtering logs by the indexed owner address.
pub fn owner_topic(owner: Address) -> B256 {
    owner.into_word()
}

/// Decode one raw log into a [`RegistrationEvent`], carrying over the log's
/// transaction hash and block number for provenance.
pub fn decode_registration_event(log: &LogEntry) -> Result<RegistrationEvent, CoreError> {
    let event = IBikeRegistry::BikeRegistered::decode_raw_log(log.topics.iter().copied(), &log.data)
        .map_err(|e| CoreError::InvalidResponseData(format!("decode BikeRegistered log: {e}")))?;

    let timestamp = u64::try_from(event.timestamp).map_err(|_| {
        CoreError::InvalidResponseData(format!(
            "event timestamp {} does not fit a unix timestamp",
            event.timestamp
        ))
    })?;

    Ok(RegistrationEvent {
        owner: event.owner,
        serial: event.serial,
        brand: event.brand,
        timestamp,
        tx_hash: log.transaction_hash,
        block_number: log.block_number,
    })
}
