//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub subject_type: String,
    pub subject_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Like/dislike totals (from query)
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountsModel {
    pub likes: i64,
    pub dislikes: i64,
}
