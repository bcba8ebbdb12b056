//! Domain events - facts emitted after a state change has committed
//!
//! The notification dispatcher is the only consumer. Events carry the names
//! and titles needed for notification text so the dispatcher does not have to
//! read anything back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionKind, Snowflake, SubjectRef};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Comment Events
    // =========================================================================
    CommentPosted(CommentPostedEvent),

    // =========================================================================
    // Reaction Events
    // =========================================================================
    /// Emitted only when a toggle produced a brand-new record
    ReactionCreated(ReactionCreatedEvent),

    // =========================================================================
    // Follow Events
    // =========================================================================
    FollowToggled(FollowToggledEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CommentPosted(_) => "COMMENT_POSTED",
            Self::ReactionCreated(_) => "REACTION_CREATED",
            Self::FollowToggled(_) => "FOLLOW_TOGGLED",
        }
    }

    /// User whose action produced the event
    pub fn actor_id(&self) -> Snowflake {
        match self {
            Self::CommentPosted(e) => e.author_id,
            Self::ReactionCreated(e) => e.user_id,
            Self::FollowToggled(e) => e.follower_id,
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CommentPosted(e) => e.timestamp,
            Self::ReactionCreated(e) => e.timestamp,
            Self::FollowToggled(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPostedEvent {
    pub comment_id: Snowflake,
    pub video_id: Snowflake,
    pub video_owner_id: Snowflake,
    pub video_title: String,
    pub author_id: Snowflake,
    pub author_name: String,
    /// Author of the parent comment when this is a reply
    pub parent_author_id: Option<Snowflake>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl CommentPostedEvent {
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_author_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionCreatedEvent {
    pub subject: SubjectRef,
    pub subject_owner_id: Snowflake,
    pub video_id: Snowflake,
    /// Video title or comment content
    pub subject_title: String,
    pub user_id: Snowflake,
    pub username: String,
    pub kind: ReactionKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowToggledEvent {
    pub follower_id: Snowflake,
    pub follower_name: String,
    pub followed_id: Snowflake,
    pub now_following: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = DomainEvent::FollowToggled(FollowToggledEvent {
            follower_id: Snowflake::new(1),
            follower_name: "alice".to_string(),
            followed_id: Snowflake::new(2),
            now_following: true,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "FOLLOW_TOGGLED");
        assert_eq!(json["follower_id"], "1");
        assert_eq!(event.event_type(), "FOLLOW_TOGGLED");
        assert_eq!(event.actor_id(), Snowflake::new(1));
    }
}
