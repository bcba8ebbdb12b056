//! Entity to model mappers
//!
//! Conversions from database rows (`models`) to domain entities (`vidshare-core`).
//! Rows with enum columns use `TryFrom` since the stored text has to parse.

mod comment;
mod notification;
mod reaction;
mod user;
mod video;

/// Counts are `COUNT(*)` results and never negative
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
