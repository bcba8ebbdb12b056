//! Notification service
//!
//! Read side of notifications: listing, unread counts and read state.

use tracing::{info, instrument};

use vidshare_core::traits::NotificationQuery;
use vidshare_core::{DomainError, Identity, Snowflake};

use crate::dto::{MarkAllReadResponse, MarkReadResponse, NotificationResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        identity: Identity,
        query: NotificationQuery,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let user = self.ctx.authenticate(identity).await?;

        if !(1..=MAX_PAGE_SIZE).contains(&query.limit) {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let notifications = self
            .ctx
            .notification_repo()
            .find_by_recipient(user.id, query)
            .await?;

        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, identity: Identity) -> ServiceResult<UnreadCountResponse> {
        let user = self.ctx.authenticate(identity).await?;
        let unread = self.ctx.notification_repo().unread_count(user.id).await?;
        Ok(UnreadCountResponse { unread })
    }

    /// Mark one of the caller's notifications read
    ///
    /// `updated` is false when it was already read. Someone else's
    /// notification is reported as not found.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        identity: Identity,
        notification_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        let user = self.ctx.authenticate(identity).await?;

        let owned = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .is_some_and(|n| n.recipient_id == user.id);
        if !owned {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }

        let updated = self
            .ctx
            .notification_repo()
            .mark_read(notification_id, user.id)
            .await?;

        if updated {
            info!(notification_id = %notification_id, user_id = %user.id, "Notification read");
        }

        Ok(MarkReadResponse { updated })
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, identity: Identity) -> ServiceResult<MarkAllReadResponse> {
        let user = self.ctx.authenticate(identity).await?;
        let updated = self.ctx.notification_repo().mark_all_read(user.id).await?;

        info!(user_id = %user.id, updated, "All notifications read");

        Ok(MarkAllReadResponse { updated })
    }
}
