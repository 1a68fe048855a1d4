use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use velo_core::types::short_hash;
use velo_core::{registry, CoreError};

use super::auth::check_auth;
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
pub(super) struct RegisterRequest {
    serial: String,
    brand: String,
}

#[derive(Serialize)]
pub(super) struct RegisterResponse {
    tx_hash: String,
    short_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    explorer_url: Option<String>,
}

// ==============================================================================
// Handler
// ==============================================================================

/// Register a bike under the endpoint's first wallet account. The write is
/// simulated before submission, so duplicate serials and other contract
/// rejections come back as HTTP errors instead of wasted transactions.
pub(super) async fn post_register(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let accounts = state.rpc.accounts().await.map_err(map_core_error)?;
    let owner = accounts
        .first()
        .copied()
        .ok_or_else(|| map_core_error(CoreError::NoWalletAccount))?;

    let tx_hash = registry::register_bike(
        state.rpc.as_ref(),
        state.contract,
        owner,
        &request.serial,
        &request.brand,
    )
    .await
    .map_err(map_core_error)?;

    Ok(Json(RegisterResponse {
        tx_hash: tx_hash.to_string(),
        short_hash: short_hash(&tx_hash),
        explorer_url: state.chain.tx_url(&tx_hash),
    }))
}
