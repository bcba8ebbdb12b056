//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod notification;
mod reaction;
mod user;
mod video;

pub use comment::CommentModel;
pub use notification::NotificationModel;
pub use reaction::{ReactionCountsModel, ReactionModel};
pub use user::UserModel;
pub use video::VideoModel;
