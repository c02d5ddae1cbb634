use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entity::{follows, user};
use crate::model::{classify_db_err, ModelError};

/// Records follower -> followed. Self-follow is rejected outright; a
/// duplicate edge trips the composite key and surfaces as Integrity.
pub async fn follow<C: ConnectionTrait>(
    db: &C,
    follower_id: i32,
    followed_id: i32,
) -> Result<(), ModelError> {
    if follower_id == followed_id {
        return Err(ModelError::validation("cannot follow yourself"));
    }

    let edge = follows::ActiveModel {
        user_being_followed_id: Set(followed_id),
        user_following_id: Set(follower_id),
        created: Set(Some(Utc::now())),
    };

    edge.insert(db)
        .await
        .map(|_| ())
        .map_err(|e| classify_db_err(e, "already following this user"))
}

/// Idempotent; removing a missing edge is not an error.
pub async fn unfollow<C: ConnectionTrait>(
    db: &C,
    follower_id: i32,
    followed_id: i32,
) -> Result<(), ModelError> {
    follows::Entity::delete_many()
        .filter(follows::Column::UserFollowingId.eq(follower_id))
        .filter(follows::Column::UserBeingFollowedId.eq(followed_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Indexed existence check; never loads the edge set.
pub async fn is_following<C: ConnectionTrait>(
    db: &C,
    follower_id: i32,
    followed_id: i32,
) -> Result<bool, ModelError> {
    let edge = follows::Entity::find()
        .filter(follows::Column::UserFollowingId.eq(follower_id))
        .filter(follows::Column::UserBeingFollowedId.eq(followed_id))
        .one(db)
        .await?;
    Ok(edge.is_some())
}

pub async fn is_followed_by<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    other_id: i32,
) -> Result<bool, ModelError> {
    is_following(db, other_id, user_id).await
}

/// Users following `user_id`, newest edge first.
pub async fn followers<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<user::Model>, ModelError> {
    let list = user::Entity::find()
        .join_rev(JoinType::InnerJoin, follows::Relation::Follower.def())
        .filter(follows::Column::UserBeingFollowedId.eq(user_id))
        .order_by_desc(follows::Column::Created)
        .all(db)
        .await?;
    Ok(list)
}

/// Users that `user_id` follows, newest edge first.
pub async fn following<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<user::Model>, ModelError> {
    let list = user::Entity::find()
        .join_rev(JoinType::InnerJoin, follows::Relation::Followed.def())
        .filter(follows::Column::UserFollowingId.eq(user_id))
        .order_by_desc(follows::Column::Created)
        .all(db)
        .await?;
    Ok(list)
}

pub async fn follower_count<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, ModelError> {
    let count = follows::Entity::find()
        .filter(follows::Column::UserBeingFollowedId.eq(user_id))
        .count(db)
        .await?;
    Ok(count)
}
