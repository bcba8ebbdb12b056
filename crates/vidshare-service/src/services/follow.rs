//! Follow service
//!
//! Follow/unfollow toggling between users.

use chrono::Utc;
use tracing::{info, instrument};

use vidshare_core::events::{DomainEvent, FollowToggledEvent};
use vidshare_core::{DomainError, Identity, Snowflake};

use crate::dto::FollowResponse;

use super::context::ServiceContext;
use super::dispatcher::NotificationDispatcher;
use super::error::ServiceResult;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow `target_id` if not yet following, unfollow otherwise
    ///
    /// Following produces a follow notification for the target; unfollowing
    /// removes the ones this follower sent earlier.
    #[instrument(skip(self))]
    pub async fn toggle_follow(
        &self,
        identity: Identity,
        target_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        let follower = self.ctx.authenticate(identity).await?;

        if follower.id == target_id {
            return Err(DomainError::CannotFollowSelf.into());
        }

        if self.ctx.user_repo().find_by_id(target_id).await?.is_none() {
            return Err(DomainError::UserNotFound(target_id).into());
        }

        let applied = self.ctx.follow_repo().toggle(follower.id, target_id).await?;
        let following = applied.transition.now_following();

        info!(
            follower_id = %follower.id,
            followed_id = %target_id,
            following,
            "Follow toggled"
        );

        let event = DomainEvent::FollowToggled(FollowToggledEvent {
            follower_id: follower.id,
            follower_name: follower.username,
            followed_id: target_id,
            now_following: following,
            timestamp: Utc::now(),
        });
        NotificationDispatcher::new(self.ctx).dispatch(&event).await;

        Ok(FollowResponse {
            following,
            follower_count: applied.follower_count,
        })
    }

    /// Whether `follower_id` currently follows `followed_id`
    #[instrument(skip(self))]
    pub async fn is_following(&self, follower_id: Snowflake, followed_id: Snowflake) -> ServiceResult<bool> {
        Ok(self.ctx.follow_repo().exists(follower_id, followed_id).await?)
    }
}
