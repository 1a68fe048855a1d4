use axum::http::HeaderMap;

use super::error::AppError;

/// Validate the per-session API token carried in the `X-API-Token` header.
/// A missing or undecodable header is treated the same as a wrong token.
pub(super) fn check_auth(expected_token: &str, headers: &HeaderMap) -> Result<(), AppError> {
    let token = headers
        .get("x-api-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !constant_time_eq(token.as_bytes(), expected_token.as_bytes()) {
        return Err(AppError::Unauthorized(
            "invalid or missing X-API-Token".to_string(),
        ));
    }
    Ok(())
}

/// Compare without short-circuiting, so response timing does not reveal how
/// long a matching prefix the caller guessed.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
