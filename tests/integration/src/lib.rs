//! Integration test utilities for the vidshare backend
//!
//! Spawns the real HTTP application on an ephemeral port and talks to it
//! with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
