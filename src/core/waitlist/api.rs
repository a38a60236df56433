//! Waitlist API endpoint
//!
//! - POST /api/waitlist - Validate a signup and store it

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;

use super::model::{WaitlistError, WaitlistErrorResponse, WaitlistRequest, WaitlistResponse};
use super::{WAITLIST_ENDPOINT, WaitlistStore};

/// Convert WaitlistError to API response
impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = WaitlistErrorResponse {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Create the waitlist API router
pub fn waitlist_router<S: WaitlistStore>(store: S) -> Router {
    Router::new()
        .route(WAITLIST_ENDPOINT, post(signup_handler::<S>))
        .with_state(Arc::new(store))
}

/// POST /api/waitlist
async fn signup_handler<S: WaitlistStore>(
    State(store): State<Arc<S>>,
    payload: Result<Json<WaitlistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WaitlistResponse>), WaitlistError> {
    let Json(request) = payload.map_err(|e| WaitlistError::InvalidBody(e.body_text()))?;

    let entry = request.validate()?;

    tracing::info!("Waitlist signup for email: {}", entry.email);

    store.add_entry(&entry).await.inspect_err(|e| {
        tracing::error!("Failed to store waitlist entry: {}", e);
    })?;

    Ok((
        StatusCode::CREATED,
        Json(WaitlistResponse {
            success: true,
            message: "Added to waitlist successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Tests
// ============================================================================
