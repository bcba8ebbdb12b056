//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod comments;
pub mod health;
pub mod notifications;
pub mod reactions;
pub mod users;
pub mod videos;
