//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vidshare-core.

mod comment;
mod error;
mod follow;
mod notification;
mod reaction;
mod user;
mod video;

pub use comment::PgCommentRepository;
pub use follow::PgFollowRepository;
pub use notification::PgNotificationRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
