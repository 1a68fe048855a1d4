//! Hand-rolled parsers for Ethereum JSON-RPC result payloads.
//!
//! Quantities arrive as `0x`-prefixed hex strings per the Ethereum JSON-RPC
//! convention; unpadded (`0x2a`) and zero (`0x0`) forms are both valid.

use alloy::primitives::{Address, Bytes, B256, U256};

use crate::error::CoreError;
use crate::rpc::types::LogEntry;

fn invalid(field: &str, detail: impl std::fmt::Display) -> CoreError {
    CoreError::InvalidResponseData(format!("{field}: {detail}"))
}

fn as_hex_str<'a>(
    value: Option<&'a serde_json::Value>,
    field: &str,
) -> Result<&'a str, CoreError> {
    value
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| invalid(field, "expected hex string"))
}

pub(super) fn parse_quantity(
    value: Option<&serde_json::Value>,
    field: &str,
) -> Result<u64, CoreError> {
    let raw = as_hex_str(value, field)?;
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| invalid(field, format!("missing 0x prefix in `{raw}`")))?;
    u64::from_str_radix(digits, 16).map_err(|e| invalid(field, format!("bad quantity `{raw}`: {e}")))
}

/// Lenient quantity parser for nullable fields (e.g. `blockNumber` of a
/// pending log). Malformed values are treated as absent.
pub(super) fn parse_opt_quantity(value: Option<&serde_json::Value>) -> Option<u64> {
    let raw = value?.as_str()?;
    u64::from_str_radix(raw.strip_prefix("0x")?, 16).ok()
}

pub(super) fn parse_u256(
    value: Option<&serde_json::Value>,
    field: &str,
) -> Result<U256, CoreError> {
    let raw = as_hex_str(value, field)?;
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| invalid(field, format!("missing 0x prefix in `{raw}`")))?;
    U256::from_str_radix(digits, 16).map_err(|e| invalid(field, format!("bad quantity `{raw}`: {e}")))
}

pub(super) fn parse_address(
    value: Option<&serde_json::Value>,
    field: &str,
) -> Result<Address, CoreError> {
    let raw = as_hex_str(value, field)?;
    raw.parse()
        .map_err(|e| invalid(field, format!("bad address `{raw}`: {e}")))
}

pub(super) fn parse_b256(
    value: Option<&serde_json::Value>,
    field: &str,
) -> Result<B256, CoreError> {
    let raw = as_hex_str(value, field)?;
    raw.parse()
        .map_err(|e| invalid(field, format!("bad 32-byte hash `{raw}`: {e}")))
}

pub(super) fn parse_opt_b256(value: Option<&serde_json::Value>) -> Option<B256> {
    value?.as_str()?.parse().ok()
}

pub(super) fn parse_bytes(
    value: Option<&serde_json::Value>,
    field: &str,
) -> Result<Bytes, CoreError> {
    let raw = as_hex_str(value, field)?;
    raw.parse()
        .map_err(|e| invalid(field, format!("bad byte string `{raw}`: {e}")))
}

pub(super) fn parse_log_entry(value: &serde_json::Value) -> Result<LogEntry, CoreError> {
    let address = parse_address(value.get("address"), "log address")?;
    let data = parse_bytes(value.get("data"), "log data")?;

    let raw_topics = value
        .get("topics")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| invalid("log topics", "expected array"))?;
    let mut topics = Vec::with_capacity(raw_topics.len());
    for topic in raw_topics {
        topics.push(parse_b256(Some(topic), "log topic")?);
    }

    Ok(LogEntry {
        address,
        topics,
        data,
        block_number: parse_opt_quantity(value.get("blockNumber")),
        transaction_hash: parse_opt_b256(value.get("transactionHash")),
    })
}
