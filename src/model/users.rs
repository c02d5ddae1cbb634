use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

use crate::config::{DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL};
use crate::entity::user;
use crate::model::{classify_db_err, ModelError};
use crate::password;

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

/// Hashes the credentials and inserts the user. Uniqueness of username and
/// email is enforced by the store; a collision comes back as
/// `ModelError::Integrity`.
pub async fn signup<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<user::Model, ModelError> {
    if new.username.trim().is_empty() {
        return Err(ModelError::validation("username cannot be null"));
    }
    if new.email.trim().is_empty() {
        return Err(ModelError::validation("email cannot be null"));
    }
    if new.password.trim().is_empty() {
        return Err(ModelError::validation("password cannot be null"));
    }

    let image_url = new
        .image_url
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let password_hash =
        password::hash(&new.password).map_err(|e| ModelError::Db(sea_orm::DbErr::Custom(e.to_string())))?;
    let now = Utc::now();

    let model = user::ActiveModel {
        username: Set(new.username),
        email: Set(new.email),
        password_hash: Set(password_hash),
        image_url: Set(Some(image_url)),
        header_image_url: Set(Some(DEFAULT_HEADER_IMAGE_URL.to_string())),
        created: Set(Some(now)),
        updated: Set(Some(now)),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| classify_db_err(e, "username or email already taken"))
}

/// Exact username lookup plus bcrypt verify. `None` for an unknown user or
/// a wrong password; neither is an error.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    plaintext: &str,
) -> Result<Option<user::Model>, ModelError> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(found.filter(|u| password::verify(plaintext, &u.password_hash)))
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<user::Model>, ModelError> {
    Ok(user::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>, ModelError> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?)
}

/// Messages and follow edges go with the row via FK cascade.
pub async fn delete_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ModelError> {
    user::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
