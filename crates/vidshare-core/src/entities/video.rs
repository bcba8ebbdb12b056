//! Video entity - metadata for an uploaded video
//!
//! The media file itself lives in external storage. Like/dislike totals are
//! not stored here; they are counted from the reaction table on read.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: Snowflake,
    pub uploader_id: Snowflake,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub const MAX_TITLE_LEN: usize = 200;
    pub const MAX_DESCRIPTION_LEN: usize = 5000;

    pub fn new(id: Snowflake, uploader_id: Snowflake, title: String, description: String) -> Self {
        Self {
            id,
            uploader_id,
            title,
            description,
            views: 0,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.uploader_id == user_id
    }

    /// Trim and check a title
    pub fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("title must not be empty".to_string()));
        }
        if trimmed.chars().count() > Self::MAX_TITLE_LEN {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_TITLE_LEN,
            });
        }
        Ok(trimmed.to_string())
    }
}
