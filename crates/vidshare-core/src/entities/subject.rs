//! Resolved reaction subjects

use crate::entities::{Comment, Video};
use crate::value_objects::{Snowflake, SubjectRef};

/// A subject looked up from storage, carrying what the reaction flow needs
/// to pick a notification recipient and build its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubject {
    pub subject: SubjectRef,
    /// Video uploader or comment author
    pub owner_id: Snowflake,
    /// The video itself, or the video the comment belongs to
    pub video_id: Snowflake,
    /// Video title or comment content
    pub display_title: String,
}

impl ResolvedSubject {
    pub fn from_video(video: &Video) -> Self {
        Self {
            subject: SubjectRef::video(video.id),
            owner_id: video.uploader_id,
            video_id: video.id,
            display_title: video.title.clone(),
        }
    }

    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            subject: SubjectRef::comment(comment.id),
            owner_id: comment.author_id,
            video_id: comment.video_id,
            display_title: comment.content.clone(),
        }
    }
}
