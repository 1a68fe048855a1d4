mod auth;
mod bikes;
mod error;
mod history;
mod register;
mod static_files;
mod wallet;

use std::sync::Arc;

use alloy::primitives::Address;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use velo_core::chain::ChainSpec;
use velo_core::rpc::EthRpc;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub rpc: Arc<dyn EthRpc>,
    pub chain: ChainSpec,
    pub contract: Address,
    pub api_token: String,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState, origin: &str) -> Router {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches. Otherwise, omit the header entirely so browsers
    // get a clean CORS rejection instead of a mismatched origin value.
    let allowed: axum::http::HeaderValue = origin.parse().expect("valid origin header value");
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = allowed.clone();
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed
        }))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static("x-api-token"),
        ]);

    let shared = Arc::new(state);

    let public_api = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/chain", get(chain_info));

    let protected_api = Router::new()
        .route("/api/v1/wallet", get(wallet::get_wallet))
        .route("/api/v1/bike/{serial}", get(bikes::get_bike))
        .route("/api/v1/register", post(register::post_register))
        .route("/api/v1/history", get(history::get_history));

    Router::new()
        .merge(public_api)
        .merge(protected_api)
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .fallback(static_files::static_files)
        .layer(cors)
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Network identity for the UI: chain id, currency, explorer. Public so the
/// page can render the network banner before the token is entered.
async fn chain_info(
    axum::extract::State(state): axum::extract::State<SharedState>,
) -> Json<ChainSpec> {
    Json(state.chain.clone())
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
