//! Tags Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         Uuid,
    #[sea_orm(unique)]
    pub name:       String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::video_tags::Entity")]
    VideoTags,
}

impl Related<super::videos::Entity> for Entity {
    fn to() -> RelationDef { super::video_tags::Relation::Video.def() }

    fn via() -> Option<RelationDef> { Some(super::video_tags::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
