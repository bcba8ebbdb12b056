//! PostgreSQL implementation of ReactionRepository
//!
//! `apply_toggle` locks the `(subject, user)` row with `SELECT ... FOR UPDATE`
//! and writes the next state in the same transaction. Two first-time
//! reactions racing on an absent row cannot both lock it; the loser's insert
//! hits the primary key and is reported as a conflict.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use vidshare_core::entities::{
    AppliedToggle, ReactionCounts, ReactionRecord, ReactionState, ToggleOutcome,
};
use vidshare_core::error::DomainError;
use vidshare_core::traits::{ReactionRepository, RepoResult};
use vidshare_core::value_objects::{ReactionKind, Snowflake, SubjectRef};

use crate::mappers::to_count;
use crate::models::{ReactionCountsModel, ReactionModel};

use super::error::{map_db_error, map_fk_violation};

const COUNTS_SQL: &str = r#"
    SELECT
        COUNT(*) FILTER (WHERE kind = 'like') AS likes,
        COUNT(*) FILTER (WHERE kind = 'dislike') AS dislikes
    FROM reactions
    WHERE subject_type = $1 AND subject_id = $2
"#;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_current(
        tx: &mut Transaction<'_, Postgres>,
        subject: SubjectRef,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionKind>> {
        let kind = sqlx::query_scalar::<_, String>(
            r#"
            SELECT kind FROM reactions
            WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
            FOR UPDATE
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        kind.map(|k| k.parse()).transpose()
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<ReactionRecord>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT subject_type, subject_id, user_id, kind, created_at
            FROM reactions
            WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactionRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn set(&self, subject: SubjectRef, user_id: Snowflake, kind: ReactionKind) -> RepoResult<ReactionRecord> {
        let model = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO reactions (subject_type, subject_id, user_id, kind)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subject_type, subject_id, user_id) DO UPDATE SET kind = EXCLUDED.kind
            RETURNING subject_type, subject_id, user_id, kind, created_at
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::UserNotFound(user_id)))?;

        ReactionRecord::try_from(model)
    }

    #[instrument(skip(self))]
    async fn clear(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn apply_toggle(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        requested: ReactionKind,
    ) -> RepoResult<AppliedToggle> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let current = Self::lock_current(&mut tx, subject, user_id).await?;
        let transition = ReactionState::from_kind(current).toggle(requested);
        debug!(?transition, "Computed reaction transition");

        match transition.outcome {
            ToggleOutcome::Created => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO reactions (subject_type, subject_id, user_id, kind)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (subject_type, subject_id, user_id) DO NOTHING
                    "#,
                )
                .bind(subject.subject_type.as_str())
                .bind(subject.id.into_inner())
                .bind(user_id.into_inner())
                .bind(requested.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_fk_violation(e, || DomainError::UserNotFound(user_id)))?;

                // A concurrent first reaction won the insert; rollback on drop
                if result.rows_affected() == 0 {
                    return Err(DomainError::ReactionConflict(subject));
                }
            }
            ToggleOutcome::Changed => {
                sqlx::query(
                    r#"
                    UPDATE reactions SET kind = $4
                    WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
                    "#,
                )
                .bind(subject.subject_type.as_str())
                .bind(subject.id.into_inner())
                .bind(user_id.into_inner())
                .bind(requested.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            ToggleOutcome::Removed => {
                sqlx::query(
                    r#"
                    DELETE FROM reactions
                    WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
                    "#,
                )
                .bind(subject.subject_type.as_str())
                .bind(subject.id.into_inner())
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        let counts = sqlx::query_as::<_, ReactionCountsModel>(COUNTS_SQL)
            .bind(subject.subject_type.as_str())
            .bind(subject.id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(AppliedToggle {
            transition,
            counts: ReactionCounts::from(counts),
        })
    }

    #[instrument(skip(self))]
    async fn count(&self, subject: SubjectRef, kind: ReactionKind) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reactions
            WHERE subject_type = $1 AND subject_id = $2 AND kind = $3
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    #[instrument(skip(self))]
    async fn counts(&self, subject: SubjectRef) -> RepoResult<ReactionCounts> {
        let model = sqlx::query_as::<_, ReactionCountsModel>(COUNTS_SQL)
            .bind(subject.subject_type.as_str())
            .bind(subject.id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ReactionCounts::from(model))
    }
}
