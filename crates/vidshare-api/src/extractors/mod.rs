//! Axum extractors for request handling
//!
//! Custom extractors for bearer identity, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser, SignedInUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{
    CommentIdPath, NotificationIdPath, SnowflakePath, SubjectPath, UserIdPath, VideoIdPath,
};
pub use validated::ValidatedJson;
