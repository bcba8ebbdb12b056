//! # vidshare-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every operation takes the caller's [`Identity`](vidshare_core::Identity),
//! performs its state change through the repository ports held by
//! [`ServiceContext`], and hands the resulting domain event to the
//! [`NotificationDispatcher`] once the change has committed.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
