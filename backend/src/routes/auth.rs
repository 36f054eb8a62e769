//! Authentication routes
//!
//! Provides endpoints for account signup and login. Both take
//! url-encoded or multipart form bodies.

use super::form::FormBody;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use job_board_shared::types::{LoginRequest, MessageResponse, SignupRequest, TokenResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /signup
async fn signup(
    State(state): State<AppState>,
    FormBody(req): FormBody<SignupRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::signup(state.db(), req).await?;
    Ok(Json(MessageResponse::new("User created successfully")))
}

/// Login with email and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    FormBody(req): FormBody<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = UserService::login(state.db(), state.jwt(), req).await?;
    Ok(Json(TokenResponse { token }))
}
