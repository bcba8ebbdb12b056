//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use vidshare_core::entities::ToggleOutcome;
use vidshare_core::{NotificationKind, ReactionKind, SubjectType};

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a like/dislike toggle
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub likes: u64,
    pub dislikes: u64,
    /// Caller's reaction after the toggle, `null` when cleared
    pub reaction: Option<ReactionKind>,
    pub outcome: ToggleOutcome,
}

/// Reaction totals for a subject
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummaryResponse {
    pub subject_type: SubjectType,
    pub subject_id: String,
    pub likes: u64,
    pub dislikes: u64,
    /// Caller's current reaction, if authenticated
    pub reaction: Option<ReactionKind>,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A single comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment inside a thread listing
#[derive(Debug, Clone, Serialize)]
pub struct CommentNodeResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub likes: u64,
    pub dislikes: u64,
    pub replies: Vec<CommentNodeResponse>,
}

/// Comment tree of a video
#[derive(Debug, Clone, Serialize)]
pub struct CommentThreadResponse {
    pub video_id: String,
    /// Live (non-deleted) comments
    pub comment_count: u64,
    pub comments: Vec<CommentNodeResponse>,
}

// ============================================================================
// Video Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: String,
    pub uploader_id: String,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Public profile with derived statistics
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub follower_count: u64,
    pub following_count: u64,
    pub video_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Result of a follow toggle
#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub following: bool,
    pub follower_count: u64,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub sender_id: Option<String>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub target_link: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

/// Result of marking one notification read
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    /// Whether the notification was unread before
    pub updated: bool,
}

/// Result of marking every notification read
#[derive(Debug, Clone, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub database: String,
}

impl ReadinessResponse {
    /// `database_healthy` is `None` when no database is configured
    pub fn ready(store: &str, database_healthy: Option<bool>) -> Self {
        let database = match database_healthy {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "not_configured",
        };
        Self {
            status: if database_healthy == Some(false) {
                "not_ready"
            } else {
                "ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: store.to_string(),
                database: database.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_response_serialization() {
        let response = ReactionResponse {
            likes: 1,
            dislikes: 0,
            reaction: Some(ReactionKind::Like),
            outcome: ToggleOutcome::Created,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["reaction"], "like");
        assert_eq!(json["outcome"], "created");

        let cleared = ReactionResponse {
            reaction: None,
            outcome: ToggleOutcome::Removed,
            ..response
        };
        assert!(serde_json::to_value(&cleared).unwrap()["reaction"].is_null());
    }

    #[test]
    fn test_comment_node_flattens_comment() {
        let now = Utc::now();
        let node = CommentNodeResponse {
            comment: CommentResponse {
                id: "1".to_string(),
                video_id: "2".to_string(),
                author_id: "3".to_string(),
                parent_id: None,
                content: "hi".to_string(),
                is_deleted: false,
                created_at: now,
                updated_at: now,
            },
            likes: 4,
            dislikes: 0,
            replies: Vec::new(),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["likes"], 4);
        assert!(json.get("parent_id").is_none());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready("postgres", Some(true));
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let memory = ReadinessResponse::ready("memory", None);
        assert!(memory.is_ready());
        assert_eq!(memory.checks.database, "not_configured");

        let not_ready = ReadinessResponse::ready("postgres", Some(false));
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
