//! Domain events

mod domain_event;

pub use domain_event::{CommentPostedEvent, DomainEvent, FollowToggledEvent, ReactionCreatedEvent};
