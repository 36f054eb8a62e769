//! Résumé upload route

use crate::auth::ApplicantUser;
use crate::error::{ApiError, ApiResult};
use crate::services::ResumeService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use job_board_shared::types::MessageResponse;

/// Largest accepted upload, in bytes
const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// Create résumé routes
pub fn resume_routes() -> Router<AppState> {
    Router::new()
        .route("/uploadResume", post(upload_resume))
        .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES))
}

/// Upload a résumé and replace the caller's profile with its parsed fields
///
/// POST /uploadResume (multipart, file field `resume`)
async fn upload_resume(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let mut multipart = multipart?;
    let mut resume: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("resume") {
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Invalid resume upload: {}", e)))?;
            resume = Some((content_type, data.to_vec()));
        } else {
            field.bytes().await?;
        }
    }

    let (content_type, file) =
        resume.ok_or_else(|| ApiError::BadRequest("Resume file is required".to_string()))?;

    ResumeService::ingest(
        state.db(),
        state.resume_parser(),
        &user,
        content_type.as_deref(),
        file,
    )
    .await?;

    Ok(Json(MessageResponse::new("Resume uploaded successfully")))
}
