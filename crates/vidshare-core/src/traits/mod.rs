//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, FollowRepository, NotificationQuery, NotificationRepository,
    ReactionRepository, RepoResult, UserRepository, VideoRepository,
};
