use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use velo_core::CoreError;

// ==============================================================================
// Error Type
// ==============================================================================

#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Map core failures onto HTTP semantics. The typed not-found case becomes
/// 404, validation problems 400, duplicate-serial reverts 409, and endpoint
/// trouble 502; everything else is a plain internal error.
pub(super) fn map_core_error(err: CoreError) -> AppError {
    match err {
        CoreError::NotRegistered(serial) => {
            AppError::NotFound(format!("bike not registered: {serial}"))
        }
        CoreError::EmptyField(field) => AppError::BadRequest(format!("{field} must not be empty")),
        CoreError::NoWalletAccount => AppError::BadRequest(
            "no wallet account available — connect or unlock an account on the RPC endpoint"
                .to_string(),
        ),
        CoreError::Reverted(reason)
            if reason.to_ascii_lowercase().contains("already registered") =>
        {
            AppError::Conflict(format!("contract reverted: {reason}"))
        }
        CoreError::Reverted(reason) => AppError::BadRequest(format!("contract reverted: {reason}")),
        CoreError::Rpc(rpc) => AppError::BadGateway(format!("rpc error: {rpc}")),
        other => AppError::Internal(other.to_string()),
    }
}
