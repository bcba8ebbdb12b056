//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `vidshare-db` provides a Postgres
//! implementation and an in-memory one.

use async_trait::async_trait;

use crate::entities::{
    AppliedFollow, AppliedToggle, Comment, Notification, NotificationKind, ReactionCounts,
    ReactionRecord, User, Video,
};
use crate::error::DomainError;
use crate::value_objects::{ReactionKind, Snowflake, SubjectRef};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Insert a user if absent; returns whether a row was written
    async fn create(&self, user: &User) -> RepoResult<bool>;

    /// Store the profile fields (bio, location, birth date) of `user`;
    /// returns whether the user exists
    async fn update_profile(&self, user: &User) -> RepoResult<bool>;
}

// ============================================================================
// Video Repository
// ============================================================================

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Find video by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    /// Create a new video
    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// Bump the play counter, returning the new value (`None` if missing)
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<u64>>;

    /// Number of videos uploaded by a user
    async fn count_by_uploader(&self, uploader_id: Snowflake) -> RepoResult<u64>;

    /// Newest videos first, optionally only those older than `before`
    async fn list_recent(&self, before: Option<Snowflake>, limit: i64) -> RepoResult<Vec<Video>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID, including soft-deleted ones
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// All comments of a video, deleted included, oldest first
    async fn find_by_video(&self, video_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete; returns false if the comment was missing or already deleted
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Number of live comments on a video
    async fn count_by_video(&self, video_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Current reaction of a user to a subject
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<ReactionRecord>>;

    /// Write a reaction, overwriting any existing kind
    async fn set(&self, subject: SubjectRef, user_id: Snowflake, kind: ReactionKind) -> RepoResult<ReactionRecord>;

    /// Remove a reaction; returns whether one existed
    async fn clear(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<bool>;

    /// Read the current state, apply the toggle and persist the result as
    /// one atomic unit. The returned totals are read inside that unit. Fails
    /// with `ReactionConflict` if a racing writer inserted the same key first.
    async fn apply_toggle(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        requested: ReactionKind,
    ) -> RepoResult<AppliedToggle>;

    /// Count reactions of one kind on a subject
    async fn count(&self, subject: SubjectRef, kind: ReactionKind) -> RepoResult<u64>;

    /// Like and dislike totals for a subject
    async fn counts(&self, subject: SubjectRef) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Pagination options for notification listings
#[derive(Debug, Clone, Copy)]
pub struct NotificationQuery {
    /// Only notifications with an id lower than this
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            before: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a notification; `UserNotFound` if the recipient does not exist
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Notifications for a recipient, newest first
    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>>;

    /// Mark one notification read; returns whether it was unread
    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool>;

    /// Mark every unread notification of a recipient; returns how many changed
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64>;

    /// Number of unread notifications
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<u64>;

    /// Delete notifications of one kind sent from `sender_id` to `recipient_id`
    async fn delete_from_sender(
        &self,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Check whether `follower_id` follows `followed_id`
    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool>;

    /// Create the edge if absent, delete it if present, atomically, and
    /// report the target's follower total as of that write.
    /// Fails with `FollowConflict` on a racing insert.
    async fn toggle(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<AppliedFollow>;

    /// Number of users following `user_id`
    async fn follower_count(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// Number of users `user_id` follows
    async fn following_count(&self, user_id: Snowflake) -> RepoResult<u64>;
}
