use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use crate::entities::push_subscriptions;
use crate::errors::domain::DomainError;

/// A browser subscription as received from the client.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionUpsert {
    pub endpoint: String,
    pub p256dh_key: Option<String>,
    pub auth_key: Option<String>,
    pub subscription: Value,
    pub user_agent: Option<String>,
}

/// Insert or refresh the subscription identified by (`user_id`, endpoint).
pub async fn upsert_subscription<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i32,
    sub: SubscriptionUpsert,
) -> Result<push_subscriptions::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    let existing = push_subscriptions::Entity::find()
        .filter(push_subscriptions::Column::UserId.eq(user_id))
        .filter(push_subscriptions::Column::Endpoint.eq(sub.endpoint.as_str()))
        .one(conn)
        .await?;

    let saved = match existing {
        Some(row) => {
            let mut active: push_subscriptions::ActiveModel = row.into();
            active.p256dh_key = Set(sub.p256dh_key);
            active.auth_key = Set(sub.auth_key);
            active.subscription = Set(sub.subscription);
            active.user_agent = Set(sub.user_agent);
            active.updated_at = Set(now);
            active.update(conn).await?
        }
        None => {
            push_subscriptions::ActiveModel {
                id: NotSet,
                user_id: Set(user_id),
                endpoint: Set(sub.endpoint),
                p256dh_key: Set(sub.p256dh_key),
                auth_key: Set(sub.auth_key),
                subscription: Set(sub.subscription),
                user_agent: Set(sub.user_agent),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(conn)
            .await?
        }
    };

    debug!(user_id, subscription_id = saved.id, "Push subscription saved");
    Ok(saved)
}

/// The user's subscriptions, newest first.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i32,
) -> Result<Vec<push_subscriptions::Model>, DomainError> {
    Ok(push_subscriptions::Entity::find()
        .filter(push_subscriptions::Column::UserId.eq(user_id))
        .order_by_desc(push_subscriptions::Column::CreatedAt)
        .order_by_desc(push_subscriptions::Column::Id)
        .all(conn)
        .await?)
}

/// Remove the user's subscription for `endpoint`. Returns how many rows went
/// away; removing an unknown endpoint is not an error.
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i32,
    endpoint: &str,
) -> Result<u64, DomainError> {
    let result = push_subscriptions::Entity::delete_many()
        .filter(push_subscriptions::Column::UserId.eq(user_id))
        .filter(push_subscriptions::Column::Endpoint.eq(endpoint))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
