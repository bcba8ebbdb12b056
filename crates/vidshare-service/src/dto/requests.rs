//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;
use vidshare_core::{DomainError, ProfileUpdate, ReactionKind, Snowflake};

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like/dislike toggle request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    #[validate(length(min = 1, max = 16, message = "Reaction kind must be 1-16 characters"))]
    pub kind: String,
}

impl ToggleReactionRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Parse the requested kind (`like` / `dislike`, any case)
    pub fn kind(&self) -> Result<ReactionKind, DomainError> {
        self.kind.parse()
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Post a comment on a video
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    /// Comment being replied to
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

impl CreateCommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    pub fn reply_to(content: impl Into<String>, parent_id: Snowflake) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Reply addressed by the parent comment's id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

// ============================================================================
// Video Requests
// ============================================================================

/// Register metadata for an uploaded video
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Account-created hook payload from the identity provider
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountCreatedRequest {
    #[validate(length(min = 1, max = 32, message = "Username must be 1-32 characters"))]
    pub username: String,
}

/// Profile edit; omitted fields keep their value
///
/// `birth_date: null` clears the date, leaving it out keeps it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    #[serde(default)]
    pub bio: Option<String>,

    #[validate(length(max = 30, message = "Location must be at most 30 characters"))]
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub birth_date: Option<Option<NaiveDate>>,
}

impl UpdateProfileRequest {
    /// Trimmed domain update
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            bio: self.bio.map(|bio| bio.trim().to_string()),
            location: self.location.map(|location| location.trim().to_string()),
            birth_date: self.birth_date,
        }
    }
}

/// A field that is present, possibly as `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
