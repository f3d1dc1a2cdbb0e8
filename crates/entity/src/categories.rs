//! Categories Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:          Uuid,
    #[sea_orm(unique)]
    pub name:        String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at:  chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::videos::Entity")]
    Videos,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef { Relation::Videos.def() }
}

impl ActiveModelBehavior for ActiveModel {}
