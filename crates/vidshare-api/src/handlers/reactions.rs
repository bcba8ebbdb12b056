//! Reaction handlers
//!
//! Like/dislike toggling on videos and comments.

use axum::{extract::State, Json};
use vidshare_service::{
    ReactionResponse, ReactionService, ReactionSummaryResponse, ToggleReactionRequest,
};

use crate::extractors::{
    OptionalAuthUser, SignedInUser, SnowflakePath, SubjectPath, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle a like or dislike
///
/// POST /reactions/{subject_type}/{subject_id}
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: SignedInUser,
    SnowflakePath(path): SnowflakePath<SubjectPath>,
    ValidatedJson(request): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let subject = path.subject()?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .toggle_reaction(auth.identity(), subject, request)
        .await?;
    Ok(Json(response))
}

/// Like/dislike counts, plus the caller's own reaction when signed in
///
/// GET /reactions/{subject_type}/{subject_id}
pub async fn get_reactions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<SubjectPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let subject = path.subject()?;

    let service = ReactionService::new(state.service_context());
    let response = service.get_reactions(auth.identity(), subject).await?;
    Ok(Json(response))
}
