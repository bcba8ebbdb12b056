//! Video entity <-> model mapper

use vidshare_core::entities::Video;
use vidshare_core::value_objects::Snowflake;

use super::to_count;
use crate::models::VideoModel;

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            uploader_id: Snowflake::new(model.uploader_id),
            title: model.title,
            description: model.description,
            views: to_count(model.views),
            created_at: model.created_at,
        }
    }
}
