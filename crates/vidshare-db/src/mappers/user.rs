//! User entity <-> model mapper

use vidshare_core::entities::User;
use vidshare_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            bio: model.bio,
            location: model.location,
            birth_date: model.birth_date,
            created_at: model.created_at,
        }
    }
}
