//! Notification dispatcher
//!
//! Turns a committed domain event into at most one notification action.
//! Planning is pure; execution talks to the notification store and never
//! fails the caller. A notification that cannot be written is logged and
//! dropped, the triggering change stays committed.

use tracing::{debug, info, instrument, warn};

use vidshare_core::entities::{preview, Notification, NotificationKind};
use vidshare_core::events::{
    CommentPostedEvent, DomainEvent, FollowToggledEvent, ReactionCreatedEvent,
};
use vidshare_core::{DomainError, ReactionKind, Snowflake, SubjectType};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Characters of user text quoted in notification bodies
pub const PREVIEW_CHARS: usize = 50;

/// Notification content before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub recipient_id: Snowflake,
    pub sender_id: Snowflake,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub target_link: String,
}

impl NotificationDraft {
    fn into_notification(self, id: Snowflake) -> Notification {
        Notification::new(
            id,
            self.recipient_id,
            Some(self.sender_id),
            self.kind,
            self.title,
            self.body,
            self.target_link,
        )
    }
}

/// What an event asks of the notification store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    /// Nothing to do (self-action, dislike, ...)
    Skip,
    /// Create one notification
    Create(NotificationDraft),
    /// Remove earlier follow notifications from `sender_id` to `recipient_id`
    RemoveFollow {
        recipient_id: Snowflake,
        sender_id: Snowflake,
    },
}

/// Decide what an event should do to the notification store
pub fn plan(event: &DomainEvent) -> DispatchAction {
    match event {
        DomainEvent::CommentPosted(e) => plan_comment(e),
        DomainEvent::ReactionCreated(e) => plan_reaction(e),
        DomainEvent::FollowToggled(e) => plan_follow(e),
    }
}

fn comment_link(video_id: Snowflake, comment_id: Snowflake) -> String {
    format!("/videos/{video_id}#comment-{comment_id}")
}

fn plan_comment(e: &CommentPostedEvent) -> DispatchAction {
    let text = preview(&e.content, PREVIEW_CHARS);
    let target_link = comment_link(e.video_id, e.comment_id);

    // A reply only ever notifies the parent author, never the uploader
    let draft = match e.parent_author_id {
        Some(parent_author) if parent_author != e.author_id => NotificationDraft {
            recipient_id: parent_author,
            sender_id: e.author_id,
            kind: NotificationKind::Comment,
            title: format!("{} replied to your comment", e.author_name),
            body: format!("{} replied: {text}", e.author_name),
            target_link,
        },
        Some(_) => return DispatchAction::Skip,
        None if e.video_owner_id != e.author_id => NotificationDraft {
            recipient_id: e.video_owner_id,
            sender_id: e.author_id,
            kind: NotificationKind::Comment,
            title: format!("{} commented on your video", e.author_name),
            body: format!(
                "{} commented on \"{}\": {text}",
                e.author_name, e.video_title
            ),
            target_link,
        },
        None => return DispatchAction::Skip,
    };

    DispatchAction::Create(draft)
}

fn plan_reaction(e: &ReactionCreatedEvent) -> DispatchAction {
    if e.kind != ReactionKind::Like || e.subject_owner_id == e.user_id {
        return DispatchAction::Skip;
    }

    let (title, body, target_link) = match e.subject.subject_type {
        SubjectType::Video => (
            format!("{} liked your video", e.username),
            format!("{} liked \"{}\"", e.username, e.subject_title),
            format!("/videos/{}", e.video_id),
        ),
        SubjectType::Comment => (
            format!("{} liked your comment", e.username),
            format!(
                "{} liked your comment: {}",
                e.username,
                preview(&e.subject_title, PREVIEW_CHARS)
            ),
            comment_link(e.video_id, e.subject.id),
        ),
    };

    DispatchAction::Create(NotificationDraft {
        recipient_id: e.subject_owner_id,
        sender_id: e.user_id,
        kind: NotificationKind::Like,
        title,
        body,
        target_link,
    })
}

fn plan_follow(e: &FollowToggledEvent) -> DispatchAction {
    if e.follower_id == e.followed_id {
        return DispatchAction::Skip;
    }

    if !e.now_following {
        return DispatchAction::RemoveFollow {
            recipient_id: e.followed_id,
            sender_id: e.follower_id,
        };
    }

    DispatchAction::Create(NotificationDraft {
        recipient_id: e.followed_id,
        sender_id: e.follower_id,
        kind: NotificationKind::Follow,
        title: format!("{} followed you", e.follower_name),
        body: format!("{} started following you!", e.follower_name),
        target_link: format!("/users/{}", e.follower_id),
    })
}

/// Executes dispatch plans against the notification store
pub struct NotificationDispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply the event's notification effect
    ///
    /// Failures are logged as dependency failures and swallowed.
    #[instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn dispatch(&self, event: &DomainEvent) {
        let action = plan(event);
        debug!(?action, "Planned notification action");

        if let Err(e) = self.execute(action).await {
            let failure = DomainError::NotificationFailed(e.to_string());
            warn!(
                error = %failure,
                actor_id = %event.actor_id(),
                "Notification dispatch failed"
            );
        }
    }

    async fn execute(&self, action: DispatchAction) -> ServiceResult<()> {
        match action {
            DispatchAction::Skip => {}
            DispatchAction::Create(draft) => {
                let notification = draft.into_notification(self.ctx.generate_id());
                self.ctx.notification_repo().create(&notification).await?;

                info!(
                    notification_id = %notification.id,
                    recipient_id = %notification.recipient_id,
                    kind = %notification.kind,
                    "Notification created"
                );
            }
            DispatchAction::RemoveFollow {
                recipient_id,
                sender_id,
            } => {
                let removed = self
                    .ctx
                    .notification_repo()
                    .delete_from_sender(recipient_id, sender_id, NotificationKind::Follow)
                    .await?;

                info!(
                    recipient_id = %recipient_id,
                    sender_id = %sender_id,
                    removed,
                    "Follow notifications removed"
                );
            }
        }

        Ok(())
    }
}
