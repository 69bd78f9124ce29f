use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::{roles, users};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Insert data for a new account. `password_hash` is already bcrypt-hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub nim: String,
    pub password_hash: String,
    pub roles_id: i32,
    pub program_studi: String,
    pub description: Option<String>,
}

/// Profile changes; `None` leaves the column untouched. `description` uses
/// `Some(None)` to clear the value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub roles_id: Option<i32>,
    pub description: Option<Option<String>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.roles_id.is_none() && self.description.is_none()
    }
}

fn user_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::User, "User not found")
}

pub async fn list_users_with_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(users::Model, Option<roles::Model>)>, DomainError> {
    Ok(users::Entity::find()
        .find_also_related(roles::Entity)
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_user_with_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<(users::Model, Option<roles::Model>)>, DomainError> {
    Ok(users::Entity::find_by_id(id)
        .find_also_related(roles::Entity)
        .one(conn)
        .await?)
}

/// Account whose name, email or NIM equals `identifier`. When several match,
/// the oldest account wins.
pub async fn find_by_identifier<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identifier: &str,
) -> Result<Option<users::Model>, DomainError> {
    Ok(users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Name.eq(identifier))
                .add(users::Column::Email.eq(identifier))
                .add(users::Column::Nim.eq(identifier)),
        )
        .order_by_asc(users::Column::Id)
        .one(conn)
        .await?)
}

pub async fn email_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<bool, DomainError> {
    let found = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn nim_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    nim: &str,
) -> Result<bool, DomainError> {
    let found = users::Entity::find()
        .filter(users::Column::Nim.eq(nim))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<users::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: NotSet,
        name: Set(new_user.name),
        email: Set(new_user.email),
        nim: Set(new_user.nim),
        password: Set(new_user.password_hash),
        roles_id: Set(new_user.roles_id),
        program_studi: Set(new_user.program_studi),
        description: Set(new_user.description),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| DomainError::from(e).with_fk_detail("Role not found"))?;

    Ok(user)
}

pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: UserChanges,
) -> Result<users::Model, DomainError> {
    let existing = users::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(user_not_found)?;

    let mut active: users::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(roles_id) = changes.roles_id {
        active.roles_id = Set(roles_id);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    active
        .update(conn)
        .await
        .map_err(|e| DomainError::from(e).with_fk_detail("Role not found"))
}

pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = users::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(user_not_found());
    }
    Ok(())
}
