//! Notification handlers

use axum::{extract::State, Json};
use vidshare_service::{
    MarkAllReadResponse, MarkReadResponse, NotificationResponse, NotificationService,
    UnreadCountResponse,
};

use crate::extractors::{NotificationIdPath, OptionalAuthUser, Pagination, SnowflakePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// The caller's notifications, newest first
///
/// GET /notifications?limit=&before=
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let notifications = service
        .list_notifications(auth.identity(), pagination.to_query())
        .await?;
    Ok(Json(notifications))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread_count(auth.identity()).await?))
}

/// Mark one notification read
///
/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<NotificationIdPath>,
) -> ApiResult<Json<MarkReadResponse>> {
    let notification_id = path.notification_id()?;

    let service = NotificationService::new(state.service_context());
    let response = service.mark_read(auth.identity(), notification_id).await?;
    Ok(Json(response))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(auth.identity()).await?))
}
