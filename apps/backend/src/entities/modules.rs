use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "module")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub module_name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::module_access::Entity")]
    ModuleAccess,
}

impl Related<super::module_access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleAccess.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
