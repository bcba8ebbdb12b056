//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidshare_core::entities::Video;
use vidshare_core::error::DomainError;
use vidshare_core::traits::{RepoResult, VideoRepository};
use vidshare_core::value_objects::Snowflake;

use crate::mappers::to_count;
use crate::models::VideoModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let result = sqlx::query_as::<_, VideoModel>(
            r#"
            SELECT id, uploader_id, title, description, views, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, uploader_id, title, description, views, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(video.id.into_inner())
        .bind(video.uploader_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.views as i64)
        .bind(video.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::UserNotFound(video.uploader_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<u64>> {
        let views = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE videos SET views = views + 1
            WHERE id = $1
            RETURNING views
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(views.map(to_count))
    }

    #[instrument(skip(self))]
    async fn count_by_uploader(&self, uploader_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM videos WHERE uploader_id = $1
            "#,
        )
        .bind(uploader_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, before: Option<Snowflake>, limit: i64) -> RepoResult<Vec<Video>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, VideoModel>(
            r#"
            SELECT id, uploader_id, title, description, views, created_at
            FROM videos
            WHERE ($1::BIGINT IS NULL OR id < $1)
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(before.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }
}
