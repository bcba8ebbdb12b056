//! Domain entities - core business objects

mod comment;
mod follow;
mod notification;
mod reaction;
mod subject;
mod user;
mod video;

pub use comment::Comment;
pub use follow::{AppliedFollow, FollowEdge, FollowTransition};
pub use notification::{preview, Notification, NotificationKind};
pub use reaction::{
    AppliedToggle, ReactionCounts, ReactionRecord, ReactionState, ReactionTransition, ToggleOutcome,
};
pub use subject::ResolvedSubject;
pub use user::{ProfileStats, ProfileUpdate, User};
pub use video::Video;
