//! Comment entity - text attached to a video, optionally replying to another comment

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Comment entity
///
/// Comments are soft-deleted: reactions and notifications may still point at
/// a deleted comment, so the row stays addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub parent_id: Option<Snowflake>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Maximum content length in characters
    pub const MAX_CONTENT_LEN: usize = 2000;

    /// Create a top-level comment
    pub fn new(id: Snowflake, video_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            video_id,
            author_id,
            content,
            parent_id: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a reply to `parent_id`
    pub fn new_reply(
        id: Snowflake,
        video_id: Snowflake,
        author_id: Snowflake,
        content: String,
        parent_id: Snowflake,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, video_id, author_id, content)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Author or the uploader of the video may delete
    pub fn can_be_deleted_by(&self, user_id: Snowflake, video_uploader_id: Snowflake) -> bool {
        self.author_id == user_id || video_uploader_id == user_id
    }

    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Trim and check comment content
    pub fn validate_content(content: &str) -> Result<String, DomainError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if trimmed.chars().count() > Self::MAX_CONTENT_LEN {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_CONTENT_LEN,
            });
        }
        Ok(trimmed.to_string())
    }
}
