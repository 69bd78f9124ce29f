use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles_table")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_roles: i32,
    #[sea_orm(unique)]
    pub name_roles: String,
    pub keterangan: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
    #[sea_orm(has_many = "super::module_access::Entity")]
    ModuleAccess,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::module_access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleAccess.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
