//! Service context - dependency container for services
//!
//! Holds the repository ports, the id generator and the token verifier.
//! Services borrow it for the duration of one request.

use std::sync::Arc;

use sqlx::PgPool;
use vidshare_common::JwtService;
use vidshare_core::entities::User;
use vidshare_core::traits::{
    CommentRepository, FollowRepository, NotificationRepository, ReactionRepository,
    UserRepository, VideoRepository,
};
use vidshare_core::{Identity, Snowflake, SnowflakeGenerator};
use vidshare_db::{
    MemoryStore, PgCommentRepository, PgFollowRepository, PgNotificationRepository,
    PgReactionRepository, PgUserRepository, PgVideoRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on the in-memory store
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    video_repo: Arc<dyn VideoRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    follow_repo: Arc<dyn FollowRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Database pool, if the Postgres backend is in use
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Name of the storage backend, for readiness reporting
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    // Repository accessors
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn video_repo(&self) -> &dyn VideoRepository {
        self.video_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    // Service accessors
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Resolve the caller to a user record
    ///
    /// Anonymous callers and identities without a platform user are both
    /// rejected with `Unauthorized`.
    pub async fn authenticate(&self, identity: Identity) -> ServiceResult<User> {
        let user_id = identity.require_user()?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(ServiceError::unauthorized)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &self.backend_name())
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    video_repo: Option<Arc<dyn VideoRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            video_repo: None,
            comment_repo: None,
            reaction_repo: None,
            notification_repo: None,
            follow_repo: None,
            jwt_service: None,
            snowflake_generator: None,
        }
    }

    /// Wire every repository to the Postgres implementations over `pool`
    pub fn postgres(self, pool: PgPool) -> Self {
        self.user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .video_repo(Arc::new(PgVideoRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
            .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
            .pool(pool)
    }

    /// Wire every repository to one shared in-memory store
    pub fn memory(self, store: &MemoryStore) -> Self {
        self.user_repo(Arc::new(store.clone()))
            .video_repo(Arc::new(store.clone()))
            .comment_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .notification_repo(Arc::new(store.clone()))
            .follow_repo(Arc::new(store.clone()))
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn video_repo(mut self, repo: Arc<dyn VideoRepository>) -> Self {
        self.video_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            video_repo: self
                .video_repo
                .ok_or_else(|| ServiceError::validation("video_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            follow_repo: self
                .follow_repo
                .ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
