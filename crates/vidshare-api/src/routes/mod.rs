//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{comments, health, notifications, reactions, users, videos};
use crate::state::AppState;

/// Create the main API router (health routes are kept out of rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(video_routes())
        .merge(comment_routes())
        .merge(reaction_routes())
        .merge(user_routes())
        .merge(notification_routes())
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/videos",
            get(videos::list_videos).post(videos::register_video),
        )
        .route("/videos/:video_id", get(videos::view_video))
        .route(
            "/videos/:video_id/comments",
            get(comments::list_video_comments).post(comments::post_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/comments/:comment_id/replies", post(comments::reply_to_comment))
}

fn reaction_routes() -> Router<AppState> {
    Router::new().route(
        "/reactions/:subject_type/:subject_id",
        get(reactions::get_reactions).post(reactions::toggle_reaction),
    )
}

/// User routes
///
/// `/users/@me` is matched before `/users/:user_id`.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            post(users::account_created).patch(users::update_profile),
        )
        .route("/users/:user_id", get(users::get_profile))
        .route("/users/:user_id/follow", post(users::toggle_follow))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
