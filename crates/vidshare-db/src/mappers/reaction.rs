//! Reaction entity <-> model mapper

use vidshare_core::entities::{ReactionCounts, ReactionRecord};
use vidshare_core::error::DomainError;
use vidshare_core::value_objects::{ReactionKind, Snowflake, SubjectRef, SubjectType};

use super::to_count;
use crate::models::{ReactionCountsModel, ReactionModel};

impl TryFrom<ReactionModel> for ReactionRecord {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let subject_type: SubjectType = model.subject_type.parse()?;
        let kind: ReactionKind = model.kind.parse()?;

        Ok(ReactionRecord {
            subject: SubjectRef::new(subject_type, Snowflake::new(model.subject_id)),
            user_id: Snowflake::new(model.user_id),
            kind,
            created_at: model.created_at,
        })
    }
}

impl From<ReactionCountsModel> for ReactionCounts {
    fn from(model: ReactionCountsModel) -> Self {
        ReactionCounts::new(to_count(model.likes), to_count(model.dislikes))
    }
}
