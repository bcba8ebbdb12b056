//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod comment;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod follow;
pub mod notification;
pub mod reaction;
pub mod user;
pub mod video;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::{DispatchAction, NotificationDispatcher, NotificationDraft, PREVIEW_CHARS};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use notification::NotificationService;
pub use reaction::ReactionService;
pub use user::UserService;
pub use video::VideoService;
