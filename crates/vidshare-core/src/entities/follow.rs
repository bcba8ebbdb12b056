//! Follow edges - directed (follower, followed) pairs
//!
//! Presence of the edge is the whole state, so toggling is a two-state
//! transition mirroring the reaction state machine.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: Snowflake,
    pub followed_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    pub fn new(follower_id: Snowflake, followed_id: Snowflake) -> Self {
        Self {
            follower_id,
            followed_id,
            created_at: Utc::now(),
        }
    }
}

/// Result of a follow toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowTransition {
    Followed,
    Unfollowed,
}

impl FollowTransition {
    /// Next transition given whether the edge currently exists
    pub fn from_existing(exists: bool) -> Self {
        if exists {
            Self::Unfollowed
        } else {
            Self::Followed
        }
    }

    #[inline]
    pub fn now_following(self) -> bool {
        matches!(self, Self::Followed)
    }
}

/// A persisted follow toggle and the target's follower total as of that write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedFollow {
    pub transition: FollowTransition,
    pub follower_count: u64,
}
