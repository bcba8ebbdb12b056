//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AccountCreatedRequest, CreateCommentRequest, RegisterVideoRequest, ReplyCommentRequest,
    ToggleReactionRequest, UpdateProfileRequest,
};

pub use responses::{
    CommentNodeResponse, CommentResponse, CommentThreadResponse, FollowResponse, HealthChecks,
    HealthResponse, MarkAllReadResponse, MarkReadResponse, NotificationResponse, ProfileResponse,
    ReactionResponse, ReactionSummaryResponse, ReadinessResponse, UnreadCountResponse,
    UserResponse, VideoResponse,
};

pub use mappers::{ProfileWithStats, VideoWithCounts};
