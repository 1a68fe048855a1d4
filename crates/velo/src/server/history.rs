use alloy::primitives::Address;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use velo_core::registry;
use velo_core::types::short_address;

use super::auth::check_auth;
use super::bikes::format_timestamp;
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
pub(super) struct HistoryQuery {
    /// Optional owner address; when present, only that owner's registrations
    /// are returned.
    owner: Option<String>,
}

#[derive(Serialize)]
pub(super) struct HistoryEntry {
    owner: String,
    short_owner: String,
    serial: String,
    brand: String,
    timestamp: u64,
    registered_at_utc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_number: Option<u64>,
}

#[derive(Serialize)]
pub(super) struct HistoryResponse {
    entries: Vec<HistoryEntry>,
}

// ==============================================================================
// Handler
// ==============================================================================

/// List decoded `BikeRegistered` events, newest first, optionally filtered by
/// the indexed owner address.
pub(super) async fn get_history(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let owner = query
        .owner
        .as_deref()
        .map(str::parse::<Address>)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("invalid owner address: {e}")))?;

    let mut events = registry::registration_history(state.rpc.as_ref(), state.contract, owner)
        .await
        .map_err(map_core_error)?;

    // Newest first; chain order within the same block is preserved by the
    // stable sort.
    events.sort_by(|a, b| {
        (b.block_number, b.timestamp).cmp(&(a.block_number, a.timestamp))
    });

    let mut entries = Vec::with_capacity(events.len());
    for event in events {
        entries.push(HistoryEntry {
            owner: event.owner.to_string(),
            short_owner: short_address(&event.owner),
            serial: event.serial,
            brand: event.brand,
            timestamp: event.timestamp,
            registered_at_utc: format_timestamp(event.timestamp)?,
            tx_hash: event.tx_hash.map(|h| h.to_string()),
            block_number: event.block_number,
        });
    }

    Ok(Json(HistoryResponse { entries }))
}
