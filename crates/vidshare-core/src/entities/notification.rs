//! Notification entity - one fact surfaced to one recipient

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Comment,
    Like,
    Follow,
    Mention,
    System,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Like => "like",
            Self::Follow => "follow",
            Self::Mention => "mention",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(Self::Comment),
            "like" => Ok(Self::Like),
            "follow" => Ok(Self::Follow),
            "mention" => Ok(Self::Mention),
            "system" => Ok(Self::System),
            other => Err(DomainError::ValidationError(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    /// `None` for system notifications
    pub sender_id: Option<Snowflake>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub target_link: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        sender_id: Option<Snowflake>,
        kind: NotificationKind,
        title: String,
        body: String,
        target_link: String,
    ) -> Self {
        Self {
            id,
            recipient_id,
            sender_id,
            kind,
            title,
            body,
            target_link,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Mark as read; returns whether the state changed
    pub fn mark_as_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }

    #[inline]
    pub fn is_from(&self, sender_id: Snowflake) -> bool {
        self.sender_id == Some(sender_id)
    }
}

/// Truncate text to at most `max_chars` characters for notification bodies
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
