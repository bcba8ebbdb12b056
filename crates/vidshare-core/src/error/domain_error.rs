//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, SubjectRef};

/// Coarse failure classes surfaced to callers
///
/// Every [`DomainError`] belongs to exactly one kind. `DependencyFailure`
/// never reaches the caller of a triggering action; it is logged and dropped
/// by the notification dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    DependencyFailure,
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Video not found: {0}")]
    VideoNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Subject not found: {0}")]
    SubjectNotFound(SubjectRef),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid subject type: {0}")]
    InvalidSubjectType(String),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("Parent comment belongs to another video")]
    ParentOnOtherVideo,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    Unauthorized,

    #[error("Only the comment author or the video uploader may do this")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Concurrent reaction write detected for {0}")]
    ReactionConflict(SubjectRef),

    #[error("Concurrent follow write detected")]
    FollowConflict,

    // =========================================================================
    // Dependency Errors (recovered locally)
    // =========================================================================
    #[error("Notification delivery failed: {0}")]
    NotificationFailed(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_)
            | Self::VideoNotFound(_)
            | Self::CommentNotFound(_)
            | Self::NotificationNotFound(_)
            | Self::SubjectNotFound(_) => ErrorKind::NotFound,

            Self::ValidationError(_)
            | Self::InvalidReactionKind(_)
            | Self::InvalidSubjectType(_)
            | Self::EmptyContent
            | Self::ContentTooLong { .. }
            | Self::CannotFollowSelf
            | Self::ParentOnOtherVideo => ErrorKind::InvalidInput,

            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::NotCommentAuthor => ErrorKind::Forbidden,

            Self::ReactionConflict(_) | Self::FollowConflict => ErrorKind::Conflict,

            Self::NotificationFailed(_) => ErrorKind::DependencyFailure,

            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::VideoNotFound(_) => "UNKNOWN_VIDEO",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::SubjectNotFound(_) => "UNKNOWN_SUBJECT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidSubjectType(_) => "INVALID_SUBJECT_TYPE",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::ParentOnOtherVideo => "PARENT_ON_OTHER_VIDEO",

            // Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::ReactionConflict(_) => "REACTION_CONFLICT",
            Self::FollowConflict => "FOLLOW_CONFLICT",

            // Dependency
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// Caller has no (valid) identity
    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Caller is known but not allowed
    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
