#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("bike not registered: {0}")]
    NotRegistered(String),

    #[error("contract reverted: {0}")]
    Reverted(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("no unlocked wallet account available on the RPC endpoint")]
    NoWalletAccount,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid response data: {0}")]
    InvalidResponseData(String),
}

/// Transport-level and protocol-level JSON-RPC failures, kept separate from
/// domain errors so callers can distinguish "the endpoint is unhealthy"
/// from "the contract said no".
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server error {code}: {message}")]
    ServerError {
        code: i64,
        message: String,
        /// Raw `error.data` payload, when present. For reverted calls this
        /// usually holds the hex-encoded `Error(string)` bytes.
        data: Option<String>,
    },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}
