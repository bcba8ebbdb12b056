//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidshare_core::entities::{AppliedFollow, FollowTransition};
use vidshare_core::error::DomainError;
use vidshare_core::traits::{FollowRepository, RepoResult};
use vidshare_core::value_objects::Snowflake;

use crate::mappers::to_count;

use super::error::{map_db_error, map_fk_violation};

const FOLLOWER_COUNT_SQL: &str = "SELECT COUNT(*) FROM follows WHERE followed_id = $1";

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)
            "#,
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn toggle(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<AppliedFollow> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Deleting first both checks and removes an existing edge under its row lock
        let deleted = sqlx::query(
            r#"
            DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2
            "#,
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let transition = FollowTransition::from_existing(deleted.rows_affected() > 0);

        if transition.now_following() {
            let inserted = sqlx::query(
                r#"
                INSERT INTO follows (follower_id, followed_id)
                VALUES ($1, $2)
                ON CONFLICT (follower_id, followed_id) DO NOTHING
                "#,
            )
            .bind(follower_id.into_inner())
            .bind(followed_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::UserNotFound(followed_id)))?;

            if inserted.rows_affected() == 0 {
                return Err(DomainError::FollowConflict);
            }
        }

        let follower_count = sqlx::query_scalar::<_, i64>(FOLLOWER_COUNT_SQL)
            .bind(followed_id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(AppliedFollow {
            transition,
            follower_count: to_count(follower_count),
        })
    }

    #[instrument(skip(self))]
    async fn follower_count(&self, user_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(FOLLOWER_COUNT_SQL)
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    #[instrument(skip(self))]
    async fn following_count(&self, user_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM follows WHERE follower_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(to_count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFollowRepository>();
    }
}
