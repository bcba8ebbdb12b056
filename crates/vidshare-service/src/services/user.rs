//! User service
//!
//! Platform-side user records and public profiles.

use chrono::Utc;
use tracing::{debug, info, instrument};
use validator::Validate;

use vidshare_core::entities::{ProfileStats, User};
use vidshare_core::{DomainError, Identity, Snowflake};

use crate::dto::{ProfileResponse, ProfileWithStats, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest accepted username, in characters
pub const MAX_USERNAME_LEN: usize = 32;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Hook called by the identity provider once an account exists
    ///
    /// Creates the platform user record. Calling it again for the same id
    /// leaves the existing record alone. Returns the stored user and whether
    /// it was created by this call.
    #[instrument(skip(self))]
    pub async fn on_account_created(
        &self,
        user_id: Snowflake,
        username: &str,
    ) -> ServiceResult<(UserResponse, bool)> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
            return Err(ServiceError::validation(format!(
                "username must be 1-{MAX_USERNAME_LEN} characters"
            )));
        }

        let created = self
            .ctx
            .user_repo()
            .create(&User::new(user_id, username.to_string()))
            .await?;

        if created {
            info!(user_id = %user_id, username, "User account created");
        } else {
            debug!(user_id = %user_id, "User account already present");
        }

        let user = self.get_user_entity(user_id).await?;
        Ok((UserResponse::from(&user), created))
    }

    /// Public profile with follower/following/video counts
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self.get_user_entity(user_id).await?;

        let stats = ProfileStats {
            follower_count: self.ctx.follow_repo().follower_count(user_id).await?,
            following_count: self.ctx.follow_repo().following_count(user_id).await?,
            video_count: self.ctx.video_repo().count_by_uploader(user_id).await?,
        };

        Ok(ProfileResponse::from(ProfileWithStats { user, stats }))
    }

    /// Edit the caller's bio, location and birth date
    ///
    /// Returns the updated public profile.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        identity: Identity,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut user = self.ctx.authenticate(identity).await?;
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let update = request.into_update();
        if let Some(Some(born)) = update.birth_date {
            if born > Utc::now().date_naive() {
                return Err(ServiceError::validation("birth_date must not be in the future"));
            }
        }

        user.apply_profile(update);
        if !self.ctx.user_repo().update_profile(&user).await? {
            return Err(DomainError::UserNotFound(user.id).into());
        }

        info!(user_id = %user.id, "Profile updated");

        self.get_profile(user.id).await
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::follow::FollowService;
    use crate::services::test_support::{as_identity, memory_context, seed_user, seed_video};
    use chrono::{Duration, NaiveDate};

    #[tokio::test]
    async fn test_account_hook_is_idempotent() {
        let (ctx, _) = memory_context();
        let service = UserService::new(&ctx);
        let id = ctx.generate_id();

        let (user, created) = service.on_account_created(id, "alice").await.unwrap();
        assert!(created);
        assert_eq!(user.username, "alice");

        let (user, created) = service.on_account_created(id, "renamed").await.unwrap();
        assert!(!created);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_account_hook_validates_username() {
        let (ctx, _) = memory_context();
        let err = UserService::new(&ctx)
            .on_account_created(ctx.generate_id(), "  ")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_profile_counts() {
        let (ctx, _) = memory_context();
        let alice = seed_user(&ctx, "alice").await;
        let bob = seed_user(&ctx, "bob").await;
        seed_video(&ctx, &alice, "one").await;
        seed_video(&ctx, &alice, "two").await;
        FollowService::new(&ctx)
            .toggle_follow(as_identity(&bob), alice.id)
            .await
            .unwrap();

        let profile = UserService::new(&ctx).get_profile(alice.id).await.unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.follower_count, 1);
        assert_eq!(profile.following_count, 0);
        assert_eq!(profile.video_count, 2);

        let err = UserService::new(&ctx)
            .get_profile(Snowflake::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_profile_edit() {
        let (ctx, _) = memory_context();
        let service = UserService::new(&ctx);
        let alice = seed_user(&ctx, "alice").await;
        let born = NaiveDate::from_ymd_opt(1992, 2, 29);

        let profile = service
            .update_profile(
                as_identity(&alice),
                UpdateProfileRequest {
                    bio: Some("  cooking at night  ".to_string()),
                    location: Some("Osaka".to_string()),
                    birth_date: Some(born),
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.bio, "cooking at night");
        assert_eq!(profile.location, "Osaka");
        assert_eq!(profile.birth_date, born);

        // Omitted fields stay, an explicit null clears the date
        let profile = service
            .update_profile(
                as_identity(&alice),
                UpdateProfileRequest {
                    location: Some(String::new()),
                    birth_date: Some(None),
                    ..UpdateProfileRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.bio, "cooking at night");
        assert_eq!(profile.location, "");
        assert_eq!(profile.birth_date, None);

        let stored = service.get_profile(alice.id).await.unwrap();
        assert_eq!(stored.bio, "cooking at night");
    }

    #[tokio::test]
    async fn test_profile_edit_rules() {
        let (ctx, _) = memory_context();
        let service = UserService::new(&ctx);
        let alice = seed_user(&ctx, "alice").await;

        let err = service
            .update_profile(Identity::Anonymous, UpdateProfileRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = service
            .update_profile(
                as_identity(&alice),
                UpdateProfileRequest {
                    bio: Some("x".repeat(User::MAX_BIO_LEN + 1)),
                    ..UpdateProfileRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let err = service
            .update_profile(
                as_identity(&alice),
                UpdateProfileRequest {
                    birth_date: Some(Some(tomorrow)),
                    ..UpdateProfileRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let untouched = service.get_profile(alice.id).await.unwrap();
        assert_eq!((untouched.bio.as_str(), untouched.birth_date), ("", None));
    }
}
