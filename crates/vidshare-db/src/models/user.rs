//! User database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
