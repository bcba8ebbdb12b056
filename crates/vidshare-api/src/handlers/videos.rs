//! Video handlers

use axum::{extract::State, Json};
use vidshare_service::{RegisterVideoRequest, VideoResponse, VideoService};

use crate::extractors::{Pagination, SignedInUser, SnowflakePath, ValidatedJson, VideoIdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register an uploaded video
///
/// POST /videos
pub async fn register_video(
    State(state): State<AppState>,
    auth: SignedInUser,
    ValidatedJson(request): ValidatedJson<RegisterVideoRequest>,
) -> ApiResult<Created<VideoResponse>> {
    let service = VideoService::new(state.service_context());
    let video = service.register_video(auth.identity(), request).await?;
    Ok(Created(video))
}

/// Newest videos first
///
/// GET /videos?before={video_id}&limit={n}
pub async fn list_videos(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let videos = service
        .list_videos(pagination.before, pagination.limit)
        .await?;
    Ok(Json(videos))
}

/// Fetch a video, counting the view
///
/// GET /videos/{video_id}
pub async fn view_video(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<VideoIdPath>,
) -> ApiResult<Json<VideoResponse>> {
    let video_id = path.video_id()?;

    let service = VideoService::new(state.service_context());
    Ok(Json(service.view_video(video_id).await?))
}
