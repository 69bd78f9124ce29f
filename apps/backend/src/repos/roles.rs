use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{roles, users};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Field changes for a role; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    pub name_roles: Option<String>,
    pub keterangan: Option<String>,
}

fn role_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Role, "Role not found")
}

pub async fn list_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<roles::Model>, DomainError> {
    Ok(roles::Entity::find()
        .order_by_asc(roles::Column::IdRoles)
        .all(conn)
        .await?)
}

pub async fn find_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<roles::Model>, DomainError> {
    Ok(roles::Entity::find_by_id(id).one(conn).await?)
}

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name_roles: String,
    keterangan: Option<String>,
) -> Result<roles::Model, DomainError> {
    let role = roles::ActiveModel {
        id_roles: NotSet,
        name_roles: Set(name_roles),
        keterangan: Set(keterangan),
    }
    .insert(conn)
    .await?;

    info!(role_id = role.id_roles, "Role created");
    Ok(role)
}

pub async fn update_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: RoleChanges,
) -> Result<roles::Model, DomainError> {
    let existing = find_role(conn, id).await?.ok_or_else(role_not_found)?;

    let mut active: roles::ActiveModel = existing.into();
    if let Some(name) = changes.name_roles {
        active.name_roles = Set(name);
    }
    if let Some(keterangan) = changes.keterangan {
        active.keterangan = Set(Some(keterangan));
    }

    Ok(active.update(conn).await?)
}

/// Delete a role, refusing while any user still holds it.
pub async fn delete_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let holders = users::Entity::find()
        .filter(users::Column::RolesId.eq(id))
        .count(conn)
        .await?;
    if holders > 0 {
        return Err(DomainError::validation(
            ValidationKind::RoleInUse,
            "Cannot delete role that is still in use by users",
        ));
    }

    let result = roles::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(role_not_found());
    }

    info!(role_id = id, "Role deleted");
    Ok(())
}
