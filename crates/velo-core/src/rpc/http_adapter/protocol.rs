use crate::error::{CoreError, RpcError};

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// The JSON-RPC spec defines errors as `{"code": <int>, "message": <string>}`
/// with an optional `data` field; Ethereum endpoints use `data` to carry the
/// ABI-encoded revert payload of failed calls. If the error value matches
/// that shape, we produce a `ServerError`; otherwise we fall back to
/// `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    }

    if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
        // Keep `data` only when it is a hex string; nested objects (as some
        // endpoints emit) carry nothing we can decode uniformly.
        let data = parsed
            .data
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        CoreError::Rpc(RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
            data,
        })
    } else {
        CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        )))
    }
}
