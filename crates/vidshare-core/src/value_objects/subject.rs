//! Reaction subjects and reaction kinds
//!
//! Comments and videos share one reaction table keyed by
//! `(subject_type, subject_id, user_id)`, so the toggle engine has a single
//! implementation for both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Discriminant of a reactable subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Comment,
    Video,
}

impl SubjectType {
    /// Storage/wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comment" => Ok(Self::Comment),
            "video" => Ok(Self::Video),
            other => Err(DomainError::InvalidSubjectType(other.to_string())),
        }
    }
}

/// `(subject_type, subject_id)` pair identifying one reactable thing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectRef {
    pub subject_type: SubjectType,
    pub id: Snowflake,
}

impl SubjectRef {
    pub const fn new(subject_type: SubjectType, id: Snowflake) -> Self {
        Self { subject_type, id }
    }

    pub const fn video(id: Snowflake) -> Self {
        Self::new(SubjectType::Video, id)
    }

    pub const fn comment(id: Snowflake) -> Self {
        Self::new(SubjectType::Comment, id)
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.subject_type, self.id)
    }
}

/// Like or dislike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            _ => Err(DomainError::InvalidReactionKind(s.to_string())),
        }
    }
}
