//! Caller identity as reported by the identity provider

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Who is making a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    User(Snowflake),
}

impl Identity {
    /// The authenticated user ID, or `Unauthorized` for anonymous callers
    pub fn require_user(self) -> Result<Snowflake, DomainError> {
        match self {
            Self::User(id) => Ok(id),
            Self::Anonymous => Err(DomainError::Unauthorized),
        }
    }

    #[inline]
    pub fn user_id(self) -> Option<Snowflake> {
        match self {
            Self::User(id) => Some(id),
            Self::Anonymous => None,
        }
    }
}

impl From<Option<Snowflake>> for Identity {
    fn from(user_id: Option<Snowflake>) -> Self {
        user_id.map_or(Self::Anonymous, Self::User)
    }
}
