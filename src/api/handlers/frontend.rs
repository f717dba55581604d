//! Hand-off routes to the external dashboard.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /` - sends visitors to the dashboard, or answers 204 when none is configured.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    match state.frontend_base_url.as_deref() {
        Some(frontend) => found(frontend.to_string()),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// `GET /code/{code}` - sends visitors to the dashboard's stats page for `code`.
///
/// # Errors
///
/// Returns 404 Not Found when no dashboard is configured.
pub async fn code_page_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(frontend) = state.frontend_base_url.as_deref() else {
        return Err(AppError::not_found(
            "Not found",
            json!({ "code": code }),
        ));
    };

    Ok(found(format!(
        "{}/code/{}",
        frontend,
        urlencoding::encode(&code)
    )))
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
