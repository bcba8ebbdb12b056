//! Test fixtures and wire shapes
//!
//! Request bodies sent to the API and the subset of response fields the
//! tests assert on.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Serialize)]
pub struct AccountRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    pub kind: String,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self {
            kind: "like".to_string(),
        }
    }

    pub fn dislike() -> Self {
        Self {
            kind: "dislike".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CommentRequest {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoRequest {
    pub title: String,
    pub description: Option<String>,
}

impl VideoRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("Test video {}", unique_suffix()),
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoBody {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: String,
    pub video_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub is_deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct CommentNodeBody {
    pub id: String,
    pub content: String,
    pub is_deleted: bool,
    pub likes: u64,
    pub replies: Vec<CommentNodeBody>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadBody {
    pub comment_count: u64,
    pub comments: Vec<CommentNodeBody>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub likes: u64,
    pub dislikes: u64,
    pub reaction: Option<String>,
    pub outcome: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowBody {
    pub following: bool,
    pub follower_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub username: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub video_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct NotificationBody {
    pub id: String,
    pub sender_id: Option<String>,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub target_link: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct UnreadBody {
    pub unread: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatedBody {
    pub updated: bool,
}
