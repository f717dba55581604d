//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that do not match `[A-Za-z0-9]{6,8}` without touching storage
/// 2. Atomically record the click and fetch the target
/// 3. Return 302 Found with `Location` set to the target
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown. No click is
/// recorded and no redirect happens in that case.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        return Err(not_found(&code));
    }

    let clicked = state
        .link_service
        .record_click(&code)
        .await?
        .ok_or_else(|| not_found(&code))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, clicked.target_url)]).into_response())
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
