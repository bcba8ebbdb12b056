//! Comment handlers
//!
//! Posting, replying, deleting and listing comment threads.

use axum::{extract::State, Json};
use vidshare_service::{
    CommentResponse, CommentService, CommentThreadResponse, CreateCommentRequest,
    ReplyCommentRequest,
};

use crate::extractors::{
    CommentIdPath, OptionalAuthUser, SignedInUser, SnowflakePath, ValidatedJson, VideoIdPath,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Post a comment, optionally as a reply via `parent_id`
///
/// POST /videos/{video_id}/comments
pub async fn post_comment(
    State(state): State<AppState>,
    auth: SignedInUser,
    SnowflakePath(path): SnowflakePath<VideoIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let video_id = path.video_id()?;

    let service = CommentService::new(state.service_context());
    let comment = service
        .post_comment(auth.identity(), video_id, request)
        .await?;
    Ok(Created(comment))
}

/// Reply to a comment
///
/// POST /comments/{comment_id}/replies
pub async fn reply_to_comment(
    State(state): State<AppState>,
    auth: SignedInUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<ReplyCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let reply = service
        .reply_to_comment(auth.identity(), comment_id, request)
        .await?;
    Ok(Created(reply))
}

/// Soft-delete a comment
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
) -> ApiResult<NoContent> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(auth.identity(), comment_id).await?;
    Ok(NoContent)
}

/// Comment tree of a video
///
/// GET /videos/{video_id}/comments
pub async fn list_video_comments(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<VideoIdPath>,
) -> ApiResult<Json<CommentThreadResponse>> {
    let video_id = path.video_id()?;

    let service = CommentService::new(state.service_context());
    let thread = service.list_video_comments(video_id).await?;
    Ok(Json(thread))
}
