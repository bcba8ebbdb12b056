//! # vidshare-core
//!
//! Domain layer containing entities, value objects, the reaction toggle state
//! machine, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    preview, AppliedFollow, AppliedToggle, Comment, FollowEdge, FollowTransition, Notification,
    NotificationKind, ProfileStats, ProfileUpdate, ReactionCounts, ReactionRecord, ReactionState,
    ReactionTransition, ResolvedSubject, ToggleOutcome, User, Video,
};
pub use error::{DomainError, ErrorKind};
pub use events::{CommentPostedEvent, DomainEvent, FollowToggledEvent, ReactionCreatedEvent};
pub use traits::{
    CommentRepository, FollowRepository, NotificationQuery, NotificationRepository,
    ReactionRepository, RepoResult, UserRepository, VideoRepository,
};
pub use value_objects::{
    Identity, ReactionKind, Snowflake, SnowflakeGenerator, SnowflakeParseError, SubjectRef,
    SubjectType,
};
