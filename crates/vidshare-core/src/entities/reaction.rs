//! Reactions - like/dislike records and the toggle state machine
//!
//! A user holds at most one reaction per subject. Requesting the reaction you
//! already hold cancels it; requesting the other kind flips it in place.
//!
//! | Current  | Requested | Next     | Outcome |
//! |----------|-----------|----------|---------|
//! | None     | Like      | Liked    | Created |
//! | None     | Dislike   | Disliked | Created |
//! | Liked    | Like      | None     | Removed |
//! | Liked    | Dislike   | Disliked | Changed |
//! | Disliked | Dislike   | None     | Removed |
//! | Disliked | Like      | Liked    | Changed |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionKind, Snowflake, SubjectRef};

/// One user's current reaction to one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub subject: SubjectRef,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl ReactionRecord {
    pub fn new(subject: SubjectRef, user_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            subject,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Reaction state of a (subject, user) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

/// What a toggle did; gates notification dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Created,
    Changed,
    Removed,
}

/// Result of applying one toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTransition {
    pub previous: ReactionState,
    pub next: ReactionState,
    pub requested: ReactionKind,
    pub outcome: ToggleOutcome,
}

impl ReactionState {
    pub fn from_kind(kind: Option<ReactionKind>) -> Self {
        match kind {
            None => Self::None,
            Some(ReactionKind::Like) => Self::Liked,
            Some(ReactionKind::Dislike) => Self::Disliked,
        }
    }

    /// Kind that must be persisted for this state (`None` means no record)
    pub fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }

    /// Apply a reaction request to this state
    pub fn toggle(self, requested: ReactionKind) -> ReactionTransition {
        let (next, outcome) = match (self.kind(), requested) {
            (None, kind) => (Self::from_kind(Some(kind)), ToggleOutcome::Created),
            (Some(current), kind) if current == kind => (Self::None, ToggleOutcome::Removed),
            (Some(_), kind) => (Self::from_kind(Some(kind)), ToggleOutcome::Changed),
        };

        ReactionTransition {
            previous: self,
            next,
            requested,
            outcome,
        }
    }
}

impl ReactionTransition {
    /// Only a freshly created like produces a notification
    pub fn is_new_like(&self) -> bool {
        self.outcome == ToggleOutcome::Created && self.requested == ReactionKind::Like
    }
}

/// A persisted toggle together with the subject's totals as of that write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedToggle {
    pub transition: ReactionTransition,
    pub counts: ReactionCounts,
}

/// Derived like/dislike totals for a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl ReactionCounts {
    pub fn new(likes: u64, dislikes: u64) -> Self {
        Self { likes, dislikes }
    }

    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Dislike => self.dislikes,
        }
    }

    pub fn total(&self) -> u64 {
        self.likes + self.dislikes
    }
}
