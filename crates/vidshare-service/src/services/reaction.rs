//! Reaction service
//!
//! Like/dislike toggling on videos and comments, and derived totals.

use chrono::Utc;
use tracing::{info, instrument};

use vidshare_core::entities::{ResolvedSubject, ToggleOutcome};
use vidshare_core::events::{DomainEvent, ReactionCreatedEvent};
use vidshare_core::{DomainError, Identity, SubjectRef, SubjectType};

use crate::dto::{ReactionResponse, ReactionSummaryResponse, ToggleReactionRequest};

use super::context::ServiceContext;
use super::dispatcher::NotificationDispatcher;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction on a subject
    ///
    /// Requesting the reaction already held removes it, requesting the other
    /// kind flips it. Only a brand-new record is handed to the dispatcher.
    #[instrument(skip(self, request))]
    pub async fn toggle_reaction(
        &self,
        identity: Identity,
        subject: SubjectRef,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        let user = self.ctx.authenticate(identity).await?;
        let kind = request.kind()?;
        let resolved = self.resolve_live(subject).await?;

        let applied = self
            .ctx
            .reaction_repo()
            .apply_toggle(subject, user.id, kind)
            .await?;
        let transition = applied.transition;

        info!(
            subject = %subject,
            user_id = %user.id,
            requested = %kind,
            outcome = ?transition.outcome,
            "Reaction toggled"
        );

        if transition.outcome == ToggleOutcome::Created {
            let event = DomainEvent::ReactionCreated(ReactionCreatedEvent {
                subject,
                subject_owner_id: resolved.owner_id,
                video_id: resolved.video_id,
                subject_title: resolved.display_title,
                user_id: user.id,
                username: user.username,
                kind,
                timestamp: Utc::now(),
            });
            NotificationDispatcher::new(self.ctx).dispatch(&event).await;
        }

        Ok(ReactionResponse {
            likes: applied.counts.likes,
            dislikes: applied.counts.dislikes,
            reaction: transition.next.kind(),
            outcome: transition.outcome,
        })
    }

    /// Like/dislike totals, plus the caller's own reaction when known
    ///
    /// Totals stay readable for soft-deleted comments.
    #[instrument(skip(self))]
    pub async fn get_reactions(
        &self,
        identity: Identity,
        subject: SubjectRef,
    ) -> ServiceResult<ReactionSummaryResponse> {
        self.ensure_exists(subject).await?;

        let counts = self.ctx.reaction_repo().counts(subject).await?;
        let reaction = match identity.user_id() {
            Some(user_id) => self
                .ctx
                .reaction_repo()
                .find(subject, user_id)
                .await?
                .map(|record| record.kind),
            None => None,
        };

        Ok(ReactionSummaryResponse {
            subject_type: subject.subject_type,
            subject_id: subject.id.to_string(),
            likes: counts.likes,
            dislikes: counts.dislikes,
            reaction,
        })
    }

    /// Look up a subject that can still receive reactions
    async fn resolve_live(&self, subject: SubjectRef) -> ServiceResult<ResolvedSubject> {
        let resolved = match subject.subject_type {
            SubjectType::Video => self
                .ctx
                .video_repo()
                .find_by_id(subject.id)
                .await?
                .map(|video| ResolvedSubject::from_video(&video)),
            SubjectType::Comment => self
                .ctx
                .comment_repo()
                .find_by_id(subject.id)
                .await?
                .filter(|comment| !comment.is_deleted)
                .map(|comment| ResolvedSubject::from_comment(&comment)),
        };

        resolved.ok_or_else(|| DomainError::SubjectNotFound(subject).into())
    }

    async fn ensure_exists(&self, subject: SubjectRef) -> ServiceResult<()> {
        let exists = match subject.subject_type {
            SubjectType::Video => self.ctx.video_repo().find_by_id(subject.id).await?.is_some(),
            SubjectType::Comment => self
                .ctx
                .comment_repo()
                .find_by_id(subject.id)
                .await?
                .is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(DomainError::SubjectNotFound(subject).into())
        }
    }
}
