//! Native JSON-RPC client for Ethereum-compatible endpoints.
//!
//! Implements [`EthRpc`](super::EthRpc) over JSON-RPC 2.0 using `reqwest`,
//! with HTTP(S) transport, optional request rate limiting, and revert-reason
//! normalization.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::HttpRpcClient;
