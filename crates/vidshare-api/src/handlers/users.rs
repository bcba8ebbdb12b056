//! User handlers
//!
//! Account hook, profiles and follows.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use vidshare_service::{
    AccountCreatedRequest, FollowResponse, FollowService, ProfileResponse, UpdateProfileRequest,
    UserService,
};

use crate::extractors::{
    AuthUser, OptionalAuthUser, SignedInUser, SnowflakePath, UserIdPath, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Account-created hook for the token's subject
///
/// POST /users/@me
///
/// 201 when the user record was created, 200 when it already existed.
pub async fn account_created(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AccountCreatedRequest>,
) -> ApiResult<Response> {
    let service = UserService::new(state.service_context());
    let (user, created) = service
        .on_account_created(auth.user_id, &request.username)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(user)).into_response())
}

/// Edit the caller's bio, location and birth date
///
/// PATCH /users/@me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: SignedInUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let profile = service.update_profile(auth.identity(), request).await?;
    Ok(Json(profile))
}

/// Public profile
///
/// GET /users/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let profile = service.get_profile(user_id).await?;
    Ok(Json(profile))
}

/// Follow or unfollow a user
///
/// POST /users/{user_id}/follow
pub async fn toggle_follow(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<FollowResponse>> {
    let user_id = path.user_id()?;

    let service = FollowService::new(state.service_context());
    let response = service.toggle_follow(auth.identity(), user_id).await?;
    Ok(Json(response))
}
