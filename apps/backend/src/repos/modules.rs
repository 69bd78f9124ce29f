use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::entities::modules;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn list_modules<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<modules::Model>, DomainError> {
    Ok(modules::Entity::find()
        .order_by_asc(modules::Column::Id)
        .all(conn)
        .await?)
}

pub async fn create_module<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    module_name: String,
    description: Option<String>,
) -> Result<modules::Model, DomainError> {
    Ok(modules::ActiveModel {
        id: NotSet,
        module_name: Set(module_name),
        description: Set(description),
    }
    .insert(conn)
    .await?)
}

pub async fn delete_module<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = modules::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Module,
            "Module not found",
        ));
    }
    Ok(())
}
