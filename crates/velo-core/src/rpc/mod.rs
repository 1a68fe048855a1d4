//! Ethereum JSON-RPC abstraction layer.
//!
//! Defines the [`EthRpc`] trait and provides an HTTP JSON-RPC implementation
//! ([`HttpRpcClient`]) plus a test mock (`mock::MockRpc`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::HttpRpcClient;

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::error::CoreError;
use types::{CallRequest, LogEntry, LogFilter};

/// Minimal trait covering the Ethereum node methods that Velo needs.
///
/// Signing is delegated to the endpoint: `accounts` lists the unlocked
/// accounts the external wallet exposes, and `send_transaction` asks it to
/// sign and broadcast. Implementations are expected to surface contract
/// reverts as [`CoreError::Reverted`] with the decoded reason string.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64, CoreError>;

    /// `eth_blockNumber`.
    async fn block_number(&self) -> Result<u64, CoreError>;

    /// `eth_accounts` — unlocked signing accounts on the endpoint.
    async fn accounts(&self) -> Result<Vec<Address>, CoreError>;

    /// `eth_getBalance` at the latest block.
    async fn get_balance(&self, address: Address) -> Result<U256, CoreError>;

    /// `eth_call` at the latest block. Used both for reads and for
    /// simulating writes before submission.
    async fn call(&self, request: &CallRequest) -> Result<alloy::primitives::Bytes, CoreError>;

    /// `eth_sendTransaction` — sign with the endpoint's wallet and broadcast.
    async fn send_transaction(&self, request: &CallRequest) -> Result<B256, CoreError>;

    /// `eth_getLogs`.
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, CoreError>;
}
