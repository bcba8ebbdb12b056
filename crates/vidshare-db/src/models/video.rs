//! Video database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for videos table
#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub uploader_id: i64,
    pub title: String,
    pub description: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}
