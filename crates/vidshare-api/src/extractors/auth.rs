//! Bearer identity extractors
//!
//! Verifies identity-provider tokens from the Authorization header.
//! A missing header is an anonymous caller; a bad token is always rejected.
//! Header extractors run before the body is read, so a handler taking
//! [`SignedInUser`] turns anonymous callers away before any body checks.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use vidshare_core::{DomainError, Identity, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller with a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: Snowflake,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }

    pub fn identity(&self) -> Identity {
        Identity::User(self.user_id)
    }
}

fn verify_bearer(state: &AppState, bearer: &Bearer) -> Result<AuthUser, ApiError> {
    let user_id = state.jwt_service().verify(bearer.token()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected bearer token");
        ApiError::App(e)
    })?;

    Ok(AuthUser::new(user_id))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        verify_bearer(&AppState::from_ref(state), &bearer)
    }
}

/// Caller that may be anonymous
///
/// `None` when no Authorization header is present; an invalid or expired
/// token is still an error.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// Identity handed to the services
    pub fn identity(&self) -> Identity {
        self.0
            .as_ref()
            .map_or(Identity::Anonymous, AuthUser::identity)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(vidshare_common::AppError::InvalidToken))?;

        let user = verify_bearer(&AppState::from_ref(state), &bearer)?;
        Ok(OptionalAuthUser(Some(user)))
    }
}

/// Caller that must be signed in
///
/// Same rejection an anonymous caller gets from the services, raised while
/// the headers are extracted.
#[derive(Debug, Clone)]
pub struct SignedInUser(pub AuthUser);

impl SignedInUser {
    pub fn identity(&self) -> Identity {
        self.0.identity()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SignedInUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match OptionalAuthUser::from_request_parts(parts, state).await? {
            OptionalAuthUser(Some(user)) => Ok(SignedInUser(user)),
            OptionalAuthUser(None) => Err(ApiError::Domain(DomainError::Unauthorized)),
        }
    }
}
