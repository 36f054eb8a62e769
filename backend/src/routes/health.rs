//! Liveness and readiness endpoints
//!
//! `/ping` answers as long as the process serves requests. `/ping/db` also
//! round-trips the database and answers 503 while it is unreachable.

use crate::error::ErrorResponse;
use crate::{db, state::AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use job_board_shared::types::MessageResponse;

/// GET /ping
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong"))
}

/// GET /ping/db
pub async fn ping_db(State(state): State<AppState>) -> Response {
    match db::health_check(state.db()).await {
        Ok(()) => Json(MessageResponse::new("pong")).into_response(),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Database unavailable".to_string(),
                code: "UNAVAILABLE".to_string(),
            }),
        )
            .into_response(),
    }
}
