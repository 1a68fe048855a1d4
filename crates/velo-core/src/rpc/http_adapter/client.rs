use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};
use crate::rpc::types::{CallRequest, LogEntry, LogFilter};

use super::super::EthRpc;
use super::connection::parse_connection;
use super::parsing::{
    parse_address, parse_b256, parse_bytes, parse_log_entry, parse_quantity, parse_u256,
};
use super::protocol::{parse_jsonrpc_error, JsonRpcRequest, JsonRpcResponse};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Ethereum JSON-RPC client over HTTP(S).
///
/// Signing stays on the endpoint side: `eth_sendTransaction` is forwarded to
/// whatever wallet the node exposes, and this client never holds keys.
/// Contract reverts returned by `eth_call`/`eth_sendTransaction` are
/// normalized into [`CoreError::Reverted`] with the decoded reason.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: String,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a new client for an `http://` or `https://` URL.
    ///
    /// If `requests_per_second` is set, calls are rate-limited per outbound
    /// HTTP request. Public testnet endpoints commonly throttle aggressive
    /// clients, so a limiter is recommended against shared infrastructure.
    pub fn new(connection: &str, requests_per_second: Option<u32>) -> Result<Self, CoreError> {
        let url = parse_connection(connection)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client builder uses valid static config");

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::Config("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            limiter,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.wait_for_rate_limit().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        let decoded: JsonRpcResponse = serde_json::from_str(&body).map_err(|e| {
            RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={body}"))
        })?;

        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl EthRpc for HttpRpcClient {
    async fn chain_id(&self) -> Result<u64, CoreError> {
        let raw = self.rpc_call("eth_chainId", Vec::new()).await?;
        parse_quantity(Some(&raw), "eth_chainId result")
    }

    async fn block_number(&self) -> Result<u64, CoreError> {
        let raw = self.rpc_call("eth_blockNumber", Vec::new()).await?;
        parse_quantity(Some(&raw), "eth_blockNumber result")
    }

    async fn accounts(&self) -> Result<Vec<Address>, CoreError> {
        let raw = self.rpc_call("eth_accounts", Vec::new()).await?;
        let entries = raw.as_array().ok_or_else(|| {
            CoreError::InvalidResponseData("eth_accounts result: expected array".to_owned())
        })?;

        let mut accounts = Vec::with_capacity(entries.len());
        for entry in entries {
            accounts.push(parse_address(Some(entry), "eth_accounts entry")?);
        }
        Ok(accounts)
    }

    async fn get_balance(&self, address: Address) -> Result<U256, CoreError> {
        let raw = self
            .rpc_call(
                "eth_getBalance",
                vec![serde_json::json!(address), serde_json::json!("latest")],
            )
            .await?;
        parse_u256(Some(&raw), "eth_getBalance result")
    }

    async fn call(&self, request: &CallRequest) -> Result<Bytes, CoreError> {
        let raw = self
            .rpc_call(
                "eth_call",
                vec![serde_json::json!(request), serde_json::json!("latest")],
            )
            .await
            .map_err(normalize_revert_error)?;
        parse_bytes(Some(&raw), "eth_call result")
    }

    async fn send_transaction(&self, request: &CallRequest) -> Result<B256, CoreError> {
        let raw = self
            .rpc_call("eth_sendTransaction", vec![serde_json::json!(request)])
            .await
            .map_err(normalize_revert_error)?;
        parse_b256(Some(&raw), "eth_sendTransaction result")
    }

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, CoreError> {
        let raw = self
            .rpc_call("eth_getLogs", vec![serde_json::json!(filter)])
            .await?;
        let entries = raw.as_array().ok_or_else(|| {
            CoreError::InvalidResponseData("eth_getLogs result: expected array".to_owned())
        })?;

        let mut logs = Vec::with_capacity(entries.len());
        for entry in entries {
            logs.push(parse_log_entry(entry)?);
        }
        Ok(logs)
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

// ==============================================================================
// Revert Normalization
// ==============================================================================

/// Convert "execution reverted" JSON-RPC responses into `CoreError::Reverted`
/// with the contract's reason string.
///
/// Endpoints differ in how they report reverts: most attach the ABI-encoded
/// `Error(string)` bytes in `error.data`, some only prefix the reason into
/// the error message. Both shapes are handled here; transport failures and
/// unrelated server errors pass through untouched.
fn normalize_revert_error(err: CoreError) -> CoreError {
    let CoreError::Rpc(RpcError::ServerError {
        code,
        message,
        data,
    }) = err
    else {
        return err;
    };

    if let Some(reason) = data.as_deref().and_then(revert_reason_from_data) {
        return CoreError::Reverted(reason);
    }
    if let Some(reason) = message.strip_prefix("execution reverted: ") {
        return CoreError::Reverted(reason.to_owned());
    }
    if message.to_ascii_lowercase().contains("revert") {
        return CoreError::Reverted(message);
    }

    CoreError::Rpc(RpcError::ServerError {
        code,
        message,
        data,
    })
}

fn revert_reason_from_data(data: &str) -> Option<String> {
    let bytes: Bytes = data.parse().ok()?;
    crate::abi::decode_revert_reason(&bytes)
}
