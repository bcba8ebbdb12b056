//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Entities whose responses carry derived counters are paired with those
//! counters in small helper structs first.

use vidshare_core::entities::{
    Comment, Notification, ProfileStats, ReactionCounts, User, Video,
};

use super::responses::{
    CommentResponse, NotificationResponse, ProfileResponse, UserResponse, VideoResponse,
};

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            video_id: comment.video_id.to_string(),
            author_id: comment.author_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            // Deleted comments keep their place in a thread but not their text
            content: if comment.is_deleted {
                String::new()
            } else {
                comment.content.clone()
            },
            is_deleted: comment.is_deleted,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

/// Video plus its derived counters
#[derive(Debug, Clone)]
pub struct VideoWithCounts {
    pub video: Video,
    pub reactions: ReactionCounts,
    pub comment_count: u64,
}

impl From<VideoWithCounts> for VideoResponse {
    fn from(v: VideoWithCounts) -> Self {
        Self {
            id: v.video.id.to_string(),
            uploader_id: v.video.uploader_id.to_string(),
            title: v.video.title,
            description: v.video.description,
            views: v.video.views,
            likes: v.reactions.likes,
            dislikes: v.reactions.dislikes,
            comment_count: v.comment_count,
            created_at: v.video.created_at,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// User plus derived profile statistics
#[derive(Debug, Clone)]
pub struct ProfileWithStats {
    pub user: User,
    pub stats: ProfileStats,
}

impl From<ProfileWithStats> for ProfileResponse {
    fn from(p: ProfileWithStats) -> Self {
        Self {
            id: p.user.id.to_string(),
            username: p.user.username,
            bio: p.user.bio,
            location: p.user.location,
            birth_date: p.user.birth_date,
            follower_count: p.stats.follower_count,
            following_count: p.stats.following_count,
            video_count: p.stats.video_count,
            created_at: p.user.created_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            sender_id: n.sender_id.map(|id| id.to_string()),
            kind: n.kind,
            title: n.title.clone(),
            body: n.body.clone(),
            target_link: n.target_link.clone(),
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self::from(&n)
    }
}
