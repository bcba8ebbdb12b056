//! Fixtures shared by the service tests

use std::sync::Arc;

use async_trait::async_trait;
use vidshare_common::JwtService;
use vidshare_core::entities::{
    AppliedFollow, AppliedToggle, Comment, Notification, NotificationKind, ReactionCounts,
    ReactionRecord, User, Video,
};
use vidshare_core::traits::{
    FollowRepository, NotificationQuery, NotificationRepository, ReactionRepository, RepoResult,
};
use vidshare_core::{DomainError, Identity, ReactionKind, Snowflake, SnowflakeGenerator, SubjectRef};
use vidshare_db::MemoryStore;

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) fn memory_context() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let ctx = ServiceContextBuilder::new()
        .memory(&store)
        .jwt_service(Arc::new(JwtService::new("test-secret", 300)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap();
    (ctx, store)
}

pub(crate) async fn seed_user(ctx: &ServiceContext, username: &str) -> User {
    let user = User::new(ctx.generate_id(), username.to_string());
    ctx.user_repo().create(&user).await.unwrap();
    user
}

pub(crate) async fn seed_video(ctx: &ServiceContext, uploader: &User, title: &str) -> Video {
    let video = Video::new(ctx.generate_id(), uploader.id, title.to_string(), String::new());
    ctx.video_repo().create(&video).await.unwrap();
    video
}

pub(crate) async fn seed_comment(
    ctx: &ServiceContext,
    video: &Video,
    author: &User,
    content: &str,
) -> Comment {
    let comment = Comment::new(ctx.generate_id(), video.id, author.id, content.to_string());
    ctx.comment_repo().create(&comment).await.unwrap();
    comment
}

pub(crate) async fn inbox(ctx: &ServiceContext, user: &User) -> Vec<Notification> {
    ctx.notification_repo()
        .find_by_recipient(user.id, NotificationQuery::default())
        .await
        .unwrap()
}

pub(crate) fn as_identity(user: &User) -> Identity {
    Identity::User(user.id)
}

/// Notification store whose writes always fail
pub(crate) struct FailingNotifications;

#[async_trait]
impl NotificationRepository for FailingNotifications {
    async fn create(&self, _: &Notification) -> RepoResult<()> {
        Err(DomainError::DatabaseError("notifications offline".to_string()))
    }

    async fn find_by_id(&self, _: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(None)
    }

    async fn find_by_recipient(
        &self,
        _: Snowflake,
        _: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        Ok(Vec::new())
    }

    async fn mark_read(&self, _: Snowflake, _: Snowflake) -> RepoResult<bool> {
        Ok(false)
    }

    async fn mark_all_read(&self, _: Snowflake) -> RepoResult<u64> {
        Ok(0)
    }

    async fn unread_count(&self, _: Snowflake) -> RepoResult<u64> {
        Ok(0)
    }

    async fn delete_from_sender(
        &self,
        _: Snowflake,
        _: Snowflake,
        _: NotificationKind,
    ) -> RepoResult<u64> {
        Err(DomainError::DatabaseError("notifications offline".to_string()))
    }
}

/// Memory-backed context whose notification writes fail
pub(crate) fn context_with_failing_notifications() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let ctx = ServiceContextBuilder::new()
        .memory(&store)
        .notification_repo(Arc::new(FailingNotifications))
        .jwt_service(Arc::new(JwtService::new("test-secret", 300)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap();
    (ctx, store)
}

fn totals_offline() -> DomainError {
    DomainError::DatabaseError("totals offline".to_string())
}

/// Memory store whose standalone total reads fail while writes succeed
pub(crate) struct OfflineTotals(pub MemoryStore);

#[async_trait]
impl ReactionRepository for OfflineTotals {
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<ReactionRecord>> {
        ReactionRepository::find(&self.0, subject, user_id).await
    }

    async fn set(&self, subject: SubjectRef, user_id: Snowflake, kind: ReactionKind) -> RepoResult<ReactionRecord> {
        ReactionRepository::set(&self.0, subject, user_id, kind).await
    }

    async fn clear(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<bool> {
        ReactionRepository::clear(&self.0, subject, user_id).await
    }

    async fn apply_toggle(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        requested: ReactionKind,
    ) -> RepoResult<AppliedToggle> {
        ReactionRepository::apply_toggle(&self.0, subject, user_id, requested).await
    }

    async fn count(&self, _: SubjectRef, _: ReactionKind) -> RepoResult<u64> {
        Err(totals_offline())
    }

    async fn counts(&self, _: SubjectRef) -> RepoResult<ReactionCounts> {
        Err(totals_offline())
    }
}

#[async_trait]
impl FollowRepository for OfflineTotals {
    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        FollowRepository::exists(&self.0, follower_id, followed_id).await
    }

    async fn toggle(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<AppliedFollow> {
        FollowRepository::toggle(&self.0, follower_id, followed_id).await
    }

    async fn follower_count(&self, _: Snowflake) -> RepoResult<u64> {
        Err(totals_offline())
    }

    async fn following_count(&self, _: Snowflake) -> RepoResult<u64> {
        Err(totals_offline())
    }
}

/// Memory-backed context whose standalone reaction and follower totals fail
pub(crate) fn context_with_offline_totals() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let totals = Arc::new(OfflineTotals(store.clone()));
    let ctx = ServiceContextBuilder::new()
        .memory(&store)
        .reaction_repo(totals.clone())
        .follow_repo(totals)
        .jwt_service(Arc::new(JwtService::new("test-secret", 300)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap();
    (ctx, store)
}
