use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{module_access, modules, roles};
use crate::errors::domain::{DomainError, NotFoundKind};

/// One access row joined with its role and module, when they still exist.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessEntry {
    pub access: module_access::Model,
    pub role: Option<roles::Model>,
    pub module: Option<modules::Model>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessFlags {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Flag changes; `None` leaves the flag untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessChanges {
    pub can_view: Option<bool>,
    pub can_create: Option<bool>,
    pub can_edit: Option<bool>,
    pub can_delete: Option<bool>,
}

fn access_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Access, "Access module not found")
}

pub async fn list_access<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<AccessEntry>, DomainError> {
    let rows = module_access::Entity::find()
        .find_also_related(roles::Entity)
        .order_by_asc(module_access::Column::Id)
        .all(conn)
        .await?;

    let module_ids: Vec<i32> = rows.iter().map(|(a, _)| a.module_id).collect();
    let modules_by_id: HashMap<i32, modules::Model> = modules::Entity::find()
        .filter(modules::Column::Id.is_in(module_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(access, role)| {
            let module = modules_by_id.get(&access.module_id).cloned();
            AccessEntry {
                access,
                role,
                module,
            }
        })
        .collect())
}

pub async fn create_access<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i32,
    module_id: i32,
    flags: AccessFlags,
) -> Result<module_access::Model, DomainError> {
    module_access::ActiveModel {
        id: NotSet,
        role_id: Set(role_id),
        module_id: Set(module_id),
        can_view: Set(flags.can_view),
        can_create: Set(flags.can_create),
        can_edit: Set(flags.can_edit),
        can_delete: Set(flags.can_delete),
    }
    .insert(conn)
    .await
    .map_err(|e| DomainError::from(e).with_fk_detail("Role or module not found"))
}

pub async fn update_access<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: AccessChanges,
) -> Result<module_access::Model, DomainError> {
    let existing = module_access::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(access_not_found)?;

    let mut active: module_access::ActiveModel = existing.clone().into();
    if let Some(v) = changes.can_view {
        active.can_view = Set(v);
    }
    if let Some(v) = changes.can_create {
        active.can_create = Set(v);
    }
    if let Some(v) = changes.can_edit {
        active.can_edit = Set(v);
    }
    if let Some(v) = changes.can_delete {
        active.can_delete = Set(v);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    Ok(active.update(conn).await?)
}

pub async fn delete_access<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = module_access::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(access_not_found());
    }
    Ok(())
}
