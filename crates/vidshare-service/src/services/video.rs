//! Video service
//!
//! Registration of uploaded videos and playback with derived counters.

use tracing::{info, instrument};

use vidshare_core::entities::Video;
use vidshare_core::{DomainError, Identity, Snowflake, SubjectRef};

use crate::dto::{RegisterVideoRequest, VideoResponse, VideoWithCounts};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::MAX_PAGE_SIZE;

/// Video service
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    /// Create a new VideoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record metadata for a video whose file is already stored elsewhere
    #[instrument(skip(self, request))]
    pub async fn register_video(
        &self,
        identity: Identity,
        request: RegisterVideoRequest,
    ) -> ServiceResult<VideoResponse> {
        let uploader = self.ctx.authenticate(identity).await?;
        let title = Video::validate_title(&request.title)?;
        let description = request.description.unwrap_or_default();
        if description.chars().count() > Video::MAX_DESCRIPTION_LEN {
            return Err(DomainError::ContentTooLong {
                max: Video::MAX_DESCRIPTION_LEN,
            }
            .into());
        }

        let video = Video::new(self.ctx.generate_id(), uploader.id, title, description);
        self.ctx.video_repo().create(&video).await?;

        info!(video_id = %video.id, uploader_id = %uploader.id, "Video registered");

        self.with_counts(video).await
    }

    /// Count a play and return the video
    #[instrument(skip(self))]
    pub async fn view_video(&self, video_id: Snowflake) -> ServiceResult<VideoResponse> {
        self.ctx
            .video_repo()
            .increment_views(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;

        self.with_counts(video).await
    }

    /// Newest videos first
    ///
    /// `before` is the id of the last video of the previous page.
    #[instrument(skip(self))]
    pub async fn list_videos(
        &self,
        before: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<Vec<VideoResponse>> {
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let videos = self.ctx.video_repo().list_recent(before, limit).await?;

        let mut listed = Vec::with_capacity(videos.len());
        for video in videos {
            listed.push(self.with_counts(video).await?);
        }
        Ok(listed)
    }

    async fn with_counts(&self, video: Video) -> ServiceResult<VideoResponse> {
        let reactions = self
            .ctx
            .reaction_repo()
            .counts(SubjectRef::video(video.id))
            .await?;
        let comment_count = self.ctx.comment_repo().count_by_video(video.id).await?;

        Ok(VideoResponse::from(VideoWithCounts {
            video,
            reactions,
            comment_count,
        }))
    }
}
