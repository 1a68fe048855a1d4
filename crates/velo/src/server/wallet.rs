use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use velo_core::types::{format_units, short_address};

use super::auth::check_auth;
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
pub(super) struct WalletResponse {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    balance: Option<String>,
    currency: String,
}

// ==============================================================================
// Handler
// ==============================================================================

/// Report the endpoint's wallet state: the first unlocked account and its
/// balance in the chain's native currency. No account is not an error — the
/// UI renders a "connect a wallet" state from `connected: false`.
pub(super) async fn get_wallet(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<WalletResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let accounts = state.rpc.accounts().await.map_err(map_core_error)?;
    let currency = state.chain.currency_symbol.clone();

    let Some(address) = accounts.first().copied() else {
        return Ok(Json(WalletResponse {
            connected: false,
            address: None,
            short_address: None,
            balance: None,
            currency,
        }));
    };

    let balance = state.rpc.get_balance(address).await.map_err(map_core_error)?;

    Ok(Json(WalletResponse {
        connected: true,
        address: Some(address.to_string()),
        short_address: Some(short_address(&address)),
        balance: Some(format_units(balance, state.chain.currency_decimals)),
        currency,
    }))
}
