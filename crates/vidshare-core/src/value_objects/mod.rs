//! Value objects - immutable types that represent domain concepts

mod identity;
mod snowflake;
mod subject;

pub use identity::Identity;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use subject::{ReactionKind, SubjectRef, SubjectType};
