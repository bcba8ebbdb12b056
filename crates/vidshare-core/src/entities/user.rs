//! User entity - the platform-side record of an account
//!
//! Accounts themselves live with the identity provider; this record is
//! created by the account-created hook and carries what the platform needs
//! for notification text.

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Maximum bio length in characters
    pub const MAX_BIO_LEN: usize = 500;

    /// Maximum location length in characters
    pub const MAX_LOCATION_LEN: usize = 30;

    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            bio: String::new(),
            location: String::new(),
            birth_date: None,
            created_at: Utc::now(),
        }
    }

    /// Apply a profile edit; fields left as `None` keep their value
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = birth_date;
        }
    }
}

/// Editable profile fields
///
/// `birth_date: Some(None)` clears the stored date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
}

/// Derived profile statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub follower_count: u64,
    pub following_count: u64,
    pub video_count: u64,
}
