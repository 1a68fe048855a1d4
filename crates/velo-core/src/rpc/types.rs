//! Wire types for the Ethereum JSON-RPC methods Velo uses.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::Serialize;

/// Transaction/call object for `eth_call` and `eth_sendTransaction`.
///
/// `from` is required when simulating or submitting a write (the contract
/// reads `msg.sender`) and omitted for plain reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl CallRequest {
    /// A read-only call carrying no sender and no value.
    pub fn read(to: Address, data: Bytes) -> Self {
        Self {
            from: None,
            to,
            data,
            value: None,
        }
    }

    /// A state-changing call from `from`, to be simulated and then submitted.
    pub fn write(from: Address, to: Address, data: Bytes) -> Self {
        Self {
            from: Some(from),
            to,
            data,
            value: None,
        }
    }
}

/// Filter object for `eth_getLogs`. `None` topic positions are serialized as
/// JSON `null`, which the node treats as a wildcard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub from_block: String,
    pub to_block: String,
    pub address: Address,
    pub topics: Vec<Option<B256>>,
}

impl LogFilter {
    /// Full-range filter for one contract and topic list.
    pub fn all_history(address: Address, topics: Vec<Option<B256>>) -> Self {
        Self {
            from_block: "earliest".to_owned(),
            to_block: "latest".to_owned(),
            address,
            topics,
        }
    }
}

/// One raw log entry from `eth_getLogs`. Block number and transaction hash
/// are `None` for pending logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<B256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_request_read_omits_optional_fields() {
        let request = CallRequest::read(Address::repeat_byte(0x01), Bytes::from(vec![0xAB]));
        let json = serde_json::to_value(&request).expect("request must serialize");

        assert!(json.get("from").is_none());
        assert!(json.get("value").is_none());
        assert_eq!(
            json.get("data").and_then(serde_json::Value::as_str),
            Some("0xab")
        );
    }

    #[test]
    fn log_filter_serializes_wildcard_topics_as_null() {
        let filter = LogFilter::all_history(
            Address::repeat_byte(0x02),
            vec![Some(B256::repeat_byte(0x03)), None],
        );
        let json = serde_json::to_value(&filter).expect("filter must serialize");

        assert_eq!(
            json.get("fromBlock").and_then(serde_json::Value::as_str),
            Some("earliest")
        );
        let topics = json
            .get("topics")
            .and_then(serde_json::Value::as_array)
            .expect("topics must be an array");
        assert!(topics[0].is_string());
        assert!(topics[1].is_null());
    }
}
