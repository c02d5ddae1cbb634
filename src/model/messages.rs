use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::message;
use crate::model::{classify_db_err, ModelError};

/// Stages a message for `user_id`. Text must be non-empty and within
/// `max_len` characters; an unknown owner trips the FK and surfaces as
/// Integrity. Messages are immutable once created.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    text: &str,
    max_len: usize,
) -> Result<message::Model, ModelError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ModelError::validation("text cannot be null"));
    }
    if text.chars().count() > max_len {
        return Err(ModelError::validation(format!(
            "text cannot exceed {} characters",
            max_len
        )));
    }

    let model = message::ActiveModel {
        text: Set(text.to_string()),
        user_id: Set(user_id),
        created: Set(Some(Utc::now())),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| classify_db_err(e, "message owner does not exist"))
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<message::Model>, ModelError> {
    Ok(message::Entity::find_by_id(id).one(db).await?)
}

/// A user's messages, newest first.
pub async fn for_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<message::Model>, ModelError> {
    Ok(message::Entity::find()
        .filter(message::Column::UserId.eq(user_id))
        .order_by_desc(message::Column::Created)
        .all(db)
        .await?)
}

pub async fn count_for_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, ModelError> {
    Ok(message::Entity::find()
        .filter(message::Column::UserId.eq(user_id))
        .count(db)
        .await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ModelError> {
    message::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
