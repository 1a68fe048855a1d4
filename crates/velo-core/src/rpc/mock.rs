//! A mock Ethereum RPC backend for testing.
//!
//! Behaves like a node fronting the deployed registry contract: incoming
//! calldata is decoded and answered from an in-memory serial map, including
//! the `"Bike not registered"` revert and synthesized `BikeRegistered` logs.

use std::collections::HashMap;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::abi::{self, IBikeRegistry};
use crate::error::{CoreError, RpcError};
use crate::types::BikeRecord;

use super::types::{CallRequest, LogEntry, LogFilter};
use super::EthRpc;

const MOCK_EPOCH: u64 = 1_700_000_000;

pub struct MockRpc {
    chain_id: u64,
    block_number: u64,
    contract: Address,
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    bikes: Mutex<HashMap<String, BikeRecord>>,
    events: Mutex<Vec<LogEntry>>,
}

impl MockRpc {
    pub fn builder(contract: Address) -> MockRpcBuilder {
        MockRpcBuilder {
            chain_id: 420_420_422,
            contract,
            accounts: Vec::new(),
            balances: HashMap::new(),
            bikes: HashMap::new(),
        }
    }

    fn synthesize_event(&self, owner: Address, serial: &str, brand: &str, timestamp: u64) -> LogEntry {
        LogEntry {
            address: self.contract,
            topics: vec![abi::registration_topic(), abi::owner_topic(owner)],
            data: (serial.to_owned(), brand.to_owned(), U256::from(timestamp))
                .abi_encode_params()
                .into(),
            block_number: Some(self.block_number),
            transaction_hash: Some(keccak256(serial.as_bytes())),
        }
    }
}

pub struct MockRpcBuilder {
    chain_id: u64,
    contract: Address,
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    bikes: HashMap<String, BikeRecord>,
}

impl MockRpcBuilder {
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_account(mut self, address: Address, balance: U256) -> Self {
        self.accounts.push(address);
        self.balances.insert(address, balance);
        self
    }

    pub fn with_bike(mut self, serial: &str, record: BikeRecord) -> Self {
        self.bikes.insert(serial.to_owned(), record);
        self
    }

    pub fn build(self) -> MockRpc {
        let rpc = MockRpc {
            chain_id: self.chain_id,
            block_number: 100,
            contract: self.contract,
            accounts: self.accounts,
            balances: self.balances,
            bikes: Mutex::new(HashMap::new()),
            events: Mutex::new(Vec::new()),
        };
        {
            let mut events = rpc.events.try_lock().expect("fresh mutex must be free");
            let mut bikes = rpc.bikes.try_lock().expect("fresh mutex must be free");
            for (serial, record) in self.bikes {
                events.push(rpc.synthesize_event(
                    record.owner,
                    &serial,
                    &record.brand,
                    record.registered_at,
                ));
                bikes.insert(serial, record);
            }
        }
        rpc
    }
}

#[async_trait]
impl EthRpc for MockRpc {
    async fn chain_id(&self) -> Result<u64, CoreError> {
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64, CoreError> {
        Ok(self.block_number)
    }

    async fn accounts(&self) -> Result<Vec<Address>, CoreError> {
        Ok(self.accounts.clone())
    }

    async fn get_balance(&self, address: Address) -> Result<U256, CoreError> {
        Ok(self.balances.get(&address).copied().unwrap_or(U256::ZERO))
    }

    async fn call(&self, request: &CallRequest) -> Result<Bytes, CoreError> {
        let data = request.data.as_ref();

        if data.starts_with(&IBikeRegistry::getBikeOwnerCall::SELECTOR) {
            let call = IBikeRegistry::getBikeOwnerCall::abi_decode(data)
                .map_err(|e| CoreError::InvalidResponseData(format!("mock decode: {e}")))?;
            let bikes = self.bikes.lock().await;
            return match bikes.get(&call.serial) {
                Some(record) => Ok((
                    record.owner,
                    record.brand.clone(),
                    U256::from(record.registered_at),
                )
                    .abi_encode_params()
                    .into()),
                None => Err(CoreError::Reverted("Bike not registered".to_owned())),
            };
        }

        if data.starts_with(&IBikeRegistry::registerBikeCall::SELECTOR) {
            let call = IBikeRegistry::registerBikeCall::abi_decode(data)
                .map_err(|e| CoreError::InvalidResponseData(format!("mock decode: {e}")))?;
            let bikes = self.bikes.lock().await;
            if bikes.contains_key(&call.serial) {
                return Err(CoreError::Reverted("Bike already registered".to_owned()));
            }
            return Ok(Bytes::new());
        }

        Err(CoreError::InvalidResponseData(
            "mock: unexpected calldata selector".to_owned(),
        ))
    }

    async fn send_transaction(&self, request: &CallRequest) -> Result<B256, CoreError> {
        let from = request.from.ok_or_else(|| {
            CoreError::Rpc(RpcError::ServerError {
                code: -32000,
                message: "unknown account".to_owned(),
                data: None,
            })
        })?;

        let call = IBikeRegistry::registerBikeCall::abi_decode(request.data.as_ref())
            .map_err(|e| CoreError::InvalidResponseData(format!("mock decode: {e}")))?;

        let mut bikes = self.bikes.lock().await;
        if bikes.contains_key(&call.serial) {
            return Err(CoreError::Reverted("Bike already registered".to_owned()));
        }

        let timestamp = MOCK_EPOCH + bikes.len() as u64;
        bikes.insert(
            call.serial.clone(),
            BikeRecord {
                owner: from,
                brand: call.brand.clone(),
                registered_at: timestamp,
            },
        );
        self.events
            .lock()
            .await
            .push(self.synthesize_event(from, &call.serial, &call.brand, timestamp));

        Ok(keccak256(request.data.as_ref()))
    }

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, CoreError> {
        let events = self.events.lock().await;
        let matches = events
            .iter()
            .filter(|log| log.address == filter.address)
            .filter(|log| {
                filter.topics.iter().enumerate().all(|(i, want)| match want {
                    Some(topic) => log.topics.get(i) == Some(topic),
                    None => true,
                })
            })
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    #[tokio::test]
    async fn call_answers_seeded_bike() {
        let rpc = MockRpc::builder(contract_address())
            .with_bike("ABCD-123", record(owner(1), "Trek", 1_700_000_000))
            .build();

        let reply = rpc
            .call(&CallRequest::read(
                contract_address(),
                abi::owner_query_call_data("ABCD-123"),
            ))
            .await
            .expect("seeded bike must resolve");
        let decoded = abi::decode_owner_reply(&reply).expect("mock reply must decode");
        assert_eq!(decoded.owner, owner(1));
        assert_eq!(decoded.brand, "Trek");
    }

    #[tokio::test]
    async fn call_reverts_for_unknown_serial() {
        let rpc = MockRpc::builder(contract_address()).build();

        let err = rpc
            .call(&CallRequest::read(
                contract_address(),
                abi::owner_query_call_data("missing"),
            ))
            .await
            .expect_err("unknown serial must revert");
        assert!(matches!(err, CoreError::Reverted(reason) if reason == "Bike not registered"));
    }

    #[tokio::test]
    async fn send_transaction_registers_and_emits_event() {
        let rpc = MockRpc::builder(contract_address())
            .with_account(owner(1), U256::from(1_000_000_000_000_000_000u64))
            .build();

        let request = CallRequest::write(
            owner(1),
            contract_address(),
            abi::register_call_data("ABCD-123", "Specialized"),
        );
        rpc.call(&request).await.expect("simulation must pass");
        let hash = rpc
            .send_transaction(&request)
            .await
            .expect("submission must pass");
        assert_ne!(hash, B256::ZERO);

        let logs = rpc
            .get_logs(&LogFilter::all_history(
                contract_address(),
                vec![Some(abi::registration_topic()), Some(abi::owner_topic(owner(1)))],
            ))
            .await
            .expect("log query must pass");
        assert_eq!(logs.len(), 1);

        let event = abi::decode_registration_event(&logs[0]).expect("log must decode");
        assert_eq!(event.serial, "ABCD-123");
        assert_eq!(event.owner, owner(1));
    }

    #[tokio::test]
    async fn get_logs_owner_filter_excludes_other_owners() {
        let rpc = MockRpc::builder(contract_address())
            .with_bike("A", record(owner(1), "Trek", 1))
            .with_bike("B", record(owner(2), "Giant", 2))
            .build();

        let logs = rpc
            .get_logs(&LogFilter::all_history(
                contract_address(),
                vec![Some(abi::registration_topic()), Some(abi::owner_topic(owner(2)))],
            ))
            .await
            .expect("log query must pass");
        assert_eq!(logs.len(), 1);
        let event = abi::decode_registration_event(&logs[0]).expect("log must decode");
        assert_eq!(event.serial, "B");
    }
}
