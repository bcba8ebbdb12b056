//! Comment service
//!
//! Posting, replying, soft deletion and threaded listing of video comments.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{info, instrument};

use vidshare_core::entities::{Comment, ReactionCounts};
use vidshare_core::events::{CommentPostedEvent, DomainEvent};
use vidshare_core::{DomainError, Identity, Snowflake, SubjectRef};

use crate::dto::{
    CommentNodeResponse, CommentResponse, CommentThreadResponse, CreateCommentRequest,
    ReplyCommentRequest,
};

use super::context::ServiceContext;
use super::dispatcher::NotificationDispatcher;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment on a video, optionally as a reply
    #[instrument(skip(self, request))]
    pub async fn post_comment(
        &self,
        identity: Identity,
        video_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author = self.ctx.authenticate(identity).await?;
        let content = Comment::validate_content(&request.content)?;

        let video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let parent = match request.parent_id {
            Some(parent_id) => {
                let parent = self.find_live(parent_id).await?;
                if parent.video_id != video.id {
                    return Err(DomainError::ParentOnOtherVideo.into());
                }
                Some(parent)
            }
            None => None,
        };

        let comment = match &parent {
            Some(parent) => {
                Comment::new_reply(self.ctx.generate_id(), video.id, author.id, content, parent.id)
            }
            None => Comment::new(self.ctx.generate_id(), video.id, author.id, content),
        };
        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            video_id = %video.id,
            author_id = %author.id,
            parent_id = ?comment.parent_id,
            "Comment posted"
        );

        let event = DomainEvent::CommentPosted(CommentPostedEvent {
            comment_id: comment.id,
            video_id: video.id,
            video_owner_id: video.uploader_id,
            video_title: video.title,
            author_id: author.id,
            author_name: author.username,
            parent_author_id: parent.map(|p| p.author_id),
            content: comment.content.clone(),
            timestamp: Utc::now(),
        });
        NotificationDispatcher::new(self.ctx).dispatch(&event).await;

        Ok(CommentResponse::from(&comment))
    }

    /// Reply to a comment, addressed by its id
    #[instrument(skip(self, request))]
    pub async fn reply_to_comment(
        &self,
        identity: Identity,
        comment_id: Snowflake,
        request: ReplyCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        // Reject anonymous callers before revealing whether the parent exists
        self.ctx.authenticate(identity).await?;
        let parent = self.find_live(comment_id).await?;

        self.post_comment(
            identity,
            parent.video_id,
            CreateCommentRequest::reply_to(request.content, parent.id),
        )
        .await
    }

    /// Soft-delete a comment; allowed for its author and the video uploader
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, identity: Identity, comment_id: Snowflake) -> ServiceResult<()> {
        let user = self.ctx.authenticate(identity).await?;
        let comment = self.find_live(comment_id).await?;

        let video = self
            .ctx
            .video_repo()
            .find_by_id(comment.video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(comment.video_id))?;

        if !comment.can_be_deleted_by(user.id, video.uploader_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        // Lost a race with another delete
        if !self.ctx.comment_repo().soft_delete(comment.id).await? {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }

        info!(comment_id = %comment_id, deleted_by = %user.id, "Comment deleted");

        Ok(())
    }

    /// Comment tree of a video, oldest first at every level
    ///
    /// Deleted comments stay in the tree, with their text withheld, only
    /// while something below them is still visible.
    #[instrument(skip(self))]
    pub async fn list_video_comments(&self, video_id: Snowflake) -> ServiceResult<CommentThreadResponse> {
        if self.ctx.video_repo().find_by_id(video_id).await?.is_none() {
            return Err(DomainError::VideoNotFound(video_id).into());
        }

        let comments = self.ctx.comment_repo().find_by_video(video_id).await?;
        let comment_count = self.ctx.comment_repo().count_by_video(video_id).await?;

        let mut counts = HashMap::with_capacity(comments.len());
        for comment in &comments {
            let c = self
                .ctx
                .reaction_repo()
                .counts(SubjectRef::comment(comment.id))
                .await?;
            counts.insert(comment.id, c);
        }

        Ok(CommentThreadResponse {
            video_id: video_id.to_string(),
            comment_count,
            comments: build_thread(&comments, &counts),
        })
    }

    /// A comment that exists and is not deleted
    async fn find_live(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| DomainError::CommentNotFound(comment_id).into())
    }
}

/// Deepest nesting level in a listed thread
///
/// Replies below this level are listed under their ancestor at the cap, in
/// conversation order.
pub const MAX_REPLY_DEPTH: usize = 8;

/// A comment and the node it is listed under once nesting is capped
struct Visit<'c> {
    comment: &'c Comment,
    display_parent: Option<Snowflake>,
}

/// Arrange `comments` (oldest first) into a forest of reply trees
///
/// Works on an explicit stack: chains of any length are safe to list.
fn build_thread(
    comments: &[Comment],
    counts: &HashMap<Snowflake, ReactionCounts>,
) -> Vec<CommentNodeResponse> {
    let mut children: HashMap<Option<Snowflake>, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        children.entry(comment.parent_id).or_default().push(comment);
    }

    // Pre-order walk from the roots
    let mut order: Vec<Visit<'_>> = Vec::with_capacity(comments.len());
    let mut nest_target: HashMap<Snowflake, Snowflake> = HashMap::with_capacity(comments.len());
    let mut stack: Vec<(&Comment, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|c| (*c, 0)).collect())
        .unwrap_or_default();

    while let Some((comment, depth)) = stack.pop() {
        let display_parent = comment.parent_id.and_then(|p| nest_target.get(&p).copied());
        let target = if depth < MAX_REPLY_DEPTH {
            comment.id
        } else {
            display_parent.unwrap_or(comment.id)
        };
        nest_target.insert(comment.id, target);
        order.push(Visit {
            comment,
            display_parent,
        });

        if let Some(replies) = children.get(&Some(comment.id)) {
            stack.extend(replies.iter().rev().map(|c| (*c, depth + 1)));
        }
    }

    // Descendants come after their ancestors in pre-order, so walking it
    // backwards settles every subtree before its parent.
    let mut has_visible_reply: HashSet<Snowflake> = HashSet::new();
    let mut pending: HashMap<Snowflake, Vec<CommentNodeResponse>> = HashMap::new();
    let mut roots = Vec::new();

    for visit in order.iter().rev() {
        let comment = visit.comment;
        if comment.is_deleted && !has_visible_reply.contains(&comment.id) {
            continue;
        }
        if let Some(parent_id) = comment.parent_id {
            has_visible_reply.insert(parent_id);
        }

        // Collected last-first
        let mut replies = pending.remove(&comment.id).unwrap_or_default();
        replies.reverse();

        let c = counts.get(&comment.id).copied().unwrap_or_default();
        let node = CommentNodeResponse {
            comment: CommentResponse::from(comment),
            likes: c.likes,
            dislikes: c.dislikes,
            replies,
        };

        match visit.display_parent {
            Some(parent_id) => pending.entry(parent_id).or_default().push(node),
            None => roots.push(node),
        }
    }

    roots.reverse();
    roots
}
