//! Notification entity <-> model mapper

use vidshare_core::entities::Notification;
use vidshare_core::error::DomainError;
use vidshare_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            sender_id: model.sender_id.map(Snowflake::new),
            kind: model.kind.parse()?,
            title: model.title,
            body: model.body,
            target_link: model.target_link,
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}
