//! # vidshare-db
//!
//! Persistence layer implementing the repository traits of `vidshare-core`.
//!
//! ## Overview
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repository implementations
//! - [`MemoryStore`], an in-process backend implementing the same traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidshare_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use vidshare_db::repositories::PgReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgFollowRepository, PgNotificationRepository, PgReactionRepository,
    PgUserRepository, PgVideoRepository,
};
