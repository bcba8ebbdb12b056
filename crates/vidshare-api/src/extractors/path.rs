//! Path parameter extractors
//!
//! Ids arrive as decimal strings and are parsed into `Snowflake`s here so a
//! malformed id is a 400 rather than a 404.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use vidshare_core::{Snowflake, SubjectRef, SubjectType};

use crate::response::ApiError;

/// Path extractor that reports failures as `ApiError`
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[derive(Debug, Deserialize)]
pub struct VideoIdPath {
    pub video_id: String,
}

impl VideoIdPath {
    pub fn video_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.video_id, "video_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

#[derive(Debug, Deserialize)]
pub struct NotificationIdPath {
    pub notification_id: String,
}

impl NotificationIdPath {
    pub fn notification_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.notification_id, "notification_id")
    }
}

/// `/reactions/:subject_type/:subject_id`
#[derive(Debug, Deserialize)]
pub struct SubjectPath {
    pub subject_type: String,
    pub subject_id: String,
}

impl SubjectPath {
    /// Parse into a subject reference; an unknown type is `INVALID_SUBJECT_TYPE`
    pub fn subject(&self) -> Result<SubjectRef, ApiError> {
        let subject_type: SubjectType = self.subject_type.parse()?;
        let id = parse_id(&self.subject_id, "subject_id")?;
        Ok(SubjectRef::new(subject_type, id))
    }
}
