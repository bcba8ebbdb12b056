//! In-process store implementing every repository port
//!
//! All state sits behind one `parking_lot::RwLock`. Every mutation, including
//! the read-compute-write of a reaction or follow toggle, happens inside a
//! single write section, which gives the same exclusivity per key that the
//! Postgres backend gets from row locks. The lock is never held across an
//! `.await`.
//!
//! Referential checks mirror the foreign keys of the SQL schema so both
//! backends fail the same way.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;

use vidshare_core::entities::{
    AppliedFollow, AppliedToggle, Comment, FollowEdge, FollowTransition, Notification,
    NotificationKind, ReactionCounts, ReactionRecord, ReactionState, ToggleOutcome, User, Video,
};
use vidshare_core::error::DomainError;
use vidshare_core::traits::{
    CommentRepository, FollowRepository, NotificationQuery, NotificationRepository,
    ReactionRepository, RepoResult, UserRepository, VideoRepository,
};
use vidshare_core::value_objects::{ReactionKind, Snowflake, SubjectRef};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Snowflake, User>,
    videos: BTreeMap<Snowflake, Video>,
    comments: HashMap<Snowflake, Comment>,
    reactions: HashMap<(SubjectRef, Snowflake), ReactionRecord>,
    /// Keyed by id so iteration order is creation order
    notifications: BTreeMap<Snowflake, Notification>,
    follows: HashMap<(Snowflake, Snowflake), FollowEdge>,
}

impl State {
    fn require_user(&self, id: Snowflake) -> RepoResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id))
        }
    }

    fn counts(&self, subject: SubjectRef) -> ReactionCounts {
        self.reactions
            .values()
            .filter(|r| r.subject == subject)
            .fold(ReactionCounts::default(), |mut acc, r| {
                match r.kind {
                    ReactionKind::Like => acc.likes += 1,
                    ReactionKind::Dislike => acc.dislikes += 1,
                }
                acc
            })
    }

    fn follower_count(&self, user_id: Snowflake) -> u64 {
        self.follows.keys().filter(|(_, followed)| *followed == user_id).count() as u64
    }
}

/// In-memory backend; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reaction records held for a subject, across all users
    pub fn reaction_records(&self, subject: SubjectRef) -> usize {
        self.state
            .read()
            .reactions
            .keys()
            .filter(|(s, _)| *s == subject)
            .count()
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<bool> {
        let mut state = self.state.write();
        if state.users.contains_key(&user.id) {
            return Ok(false);
        }
        state.users.insert(user.id, user.clone());
        Ok(true)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_profile(&self, user: &User) -> RepoResult<bool> {
        let mut state = self.state.write();
        Ok(match state.users.get_mut(&user.id) {
            Some(stored) => {
                stored.bio.clone_from(&user.bio);
                stored.location.clone_from(&user.location);
                stored.birth_date = user.birth_date;
                true
            }
            None => false,
        })
    }
}

// ============================================================================
// Videos
// ============================================================================

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        Ok(self.state.read().videos.get(&id).cloned())
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        let mut state = self.state.write();
        state.require_user(video.uploader_id)?;
        state.videos.insert(video.id, video.clone());
        Ok(())
    }

    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<u64>> {
        let mut state = self.state.write();
        Ok(state.videos.get_mut(&id).map(|video| {
            video.views += 1;
            video.views
        }))
    }

    async fn count_by_uploader(&self, uploader_id: Snowflake) -> RepoResult<u64> {
        let state = self.state.read();
        Ok(state.videos.values().filter(|v| v.uploader_id == uploader_id).count() as u64)
    }

    async fn list_recent(&self, before: Option<Snowflake>, limit: i64) -> RepoResult<Vec<Video>> {
        let limit = limit.clamp(1, 100) as usize;
        let state = self.state.read();

        Ok(state
            .videos
            .values()
            .rev()
            .filter(|v| before.map_or(true, |before| v.id < before))
            .take(limit)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.read().comments.get(&id).cloned())
    }

    async fn find_by_video(&self, video_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let state = self.state.read();
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.videos.contains_key(&comment.video_id) {
            return Err(DomainError::VideoNotFound(comment.video_id));
        }
        state.require_user(comment.author_id)?;
        if let Some(parent_id) = comment.parent_id {
            if !state.comments.contains_key(&parent_id) {
                return Err(DomainError::CommentNotFound(parent_id));
            }
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.write();
        match state.comments.get_mut(&id) {
            Some(comment) if !comment.is_deleted => {
                comment.soft_delete();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_by_video(&self, video_id: Snowflake) -> RepoResult<u64> {
        let state = self.state.read();
        Ok(state
            .comments
            .values()
            .filter(|c| c.video_id == video_id && !c.is_deleted)
            .count() as u64)
    }
}

// ============================================================================
// Reactions
// ============================================================================

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<ReactionRecord>> {
        Ok(self.state.read().reactions.get(&(subject, user_id)).cloned())
    }

    async fn set(&self, subject: SubjectRef, user_id: Snowflake, kind: ReactionKind) -> RepoResult<ReactionRecord> {
        let mut state = self.state.write();
        state.require_user(user_id)?;
        let record = state
            .reactions
            .entry((subject, user_id))
            .and_modify(|r| r.kind = kind)
            .or_insert_with(|| ReactionRecord::new(subject, user_id, kind));
        Ok(record.clone())
    }

    async fn clear(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.write().reactions.remove(&(subject, user_id)).is_some())
    }

    #[instrument(skip(self))]
    async fn apply_toggle(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        requested: ReactionKind,
    ) -> RepoResult<AppliedToggle> {
        let mut state = self.state.write();
        state.require_user(user_id)?;

        let key = (subject, user_id);
        let current = state.reactions.get(&key).map(|r| r.kind);
        let transition = ReactionState::from_kind(current).toggle(requested);

        match transition.outcome {
            ToggleOutcome::Created => {
                state
                    .reactions
                    .insert(key, ReactionRecord::new(subject, user_id, requested));
            }
            ToggleOutcome::Changed => {
                if let Some(record) = state.reactions.get_mut(&key) {
                    record.kind = requested;
                }
            }
            ToggleOutcome::Removed => {
                state.reactions.remove(&key);
            }
        }

        Ok(AppliedToggle {
            transition,
            counts: state.counts(subject),
        })
    }

    async fn count(&self, subject: SubjectRef, kind: ReactionKind) -> RepoResult<u64> {
        Ok(self.state.read().counts(subject).get(kind))
    }

    async fn counts(&self, subject: SubjectRef) -> RepoResult<ReactionCounts> {
        Ok(self.state.read().counts(subject))
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[async_trait]
impl NotificationRepository for MemoryStore {
    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let mut state = self.state.write();
        state.require_user(notification.recipient_id)?;
        state.notifications.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.state.read().notifications.get(&id).cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        let limit = query.limit.clamp(1, 100) as usize;
        let state = self.state.read();

        Ok(state
            .notifications
            .values()
            .rev()
            .filter(|n| n.recipient_id == recipient_id)
            .filter(|n| query.before.map_or(true, |before| n.id < before))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.write();
        Ok(state
            .notifications
            .get_mut(&id)
            .filter(|n| n.recipient_id == recipient_id)
            .is_some_and(Notification::mark_as_read))
    }

    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.write();
        Ok(state
            .notifications
            .values_mut()
            .filter(|n| n.recipient_id == recipient_id)
            .map(Notification::mark_as_read)
            .filter(|changed| *changed)
            .count() as u64)
    }

    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let state = self.state.read();
        Ok(state
            .notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as u64)
    }

    async fn delete_from_sender(
        &self,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
    ) -> RepoResult<u64> {
        let mut state = self.state.write();
        let before = state.notifications.len();
        state
            .notifications
            .retain(|_, n| !(n.recipient_id == recipient_id && n.is_from(sender_id) && n.kind == kind));
        Ok((before - state.notifications.len()) as u64)
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.read().follows.contains_key(&(follower_id, followed_id)))
    }

    #[instrument(skip(self))]
    async fn toggle(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<AppliedFollow> {
        let mut state = self.state.write();
        state.require_user(follower_id)?;
        state.require_user(followed_id)?;

        let key = (follower_id, followed_id);
        let transition = FollowTransition::from_existing(state.follows.contains_key(&key));
        if transition.now_following() {
            state.follows.insert(key, FollowEdge::new(follower_id, followed_id));
        } else {
            state.follows.remove(&key);
        }
        Ok(AppliedFollow {
            transition,
            follower_count: state.follower_count(followed_id),
        })
    }

    async fn follower_count(&self, user_id: Snowflake) -> RepoResult<u64> {
        Ok(self.state.read().follower_count(user_id))
    }

    async fn following_count(&self, user_id: Snowflake) -> RepoResult<u64> {
        let state = self.state.read();
        Ok(state.follows.keys().filter(|(follower, _)| *follower == user_id).count() as u64)
    }
}
