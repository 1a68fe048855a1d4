use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use velo_core::registry;
use velo_core::types::short_address;

use super::auth::check_auth;
use super::error::{map_core_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
pub(super) struct BikeResponse {
    serial: String,
    owner: String,
    short_owner: String,
    brand: String,
    registered_at: u64,
    registered_at_utc: String,
}

// ==============================================================================
// Handler
// ==============================================================================

/// Look up the ownership record for a serial number. Unknown serials map to
/// 404 via the typed not-registered error.
pub(super) async fn get_bike(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(serial): Path<String>,
) -> Result<Json<BikeResponse>, AppError> {
    check_auth(&state.api_token, &headers)?;

    let record = registry::lookup_bike(state.rpc.as_ref(), state.contract, &serial)
        .await
        .map_err(map_core_error)?;

    Ok(Json(BikeResponse {
        serial: serial.trim().to_string(),
        owner: record.owner.to_string(),
        short_owner: short_address(&record.owner),
        brand: record.brand,
        registered_at: record.registered_at,
        registered_at_utc: format_timestamp(record.registered_at)?,
    }))
}

/// Render a contract timestamp (unix seconds) as an RFC 3339 UTC string.
pub(super) fn format_timestamp(unix_seconds: u64) -> Result<String, AppError> {
    let seconds = i64::try_from(unix_seconds)
        .map_err(|_| AppError::Internal(format!("timestamp {unix_seconds} out of range")))?;
    let datetime = OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| AppError::Internal(format!("timestamp {unix_seconds} out of range: {e}")))?;
    datetime
        .format(&Rfc3339)
        .map_err(|e| AppError::Internal(format!("format timestamp {unix_seconds}: {e}")))
}
