//! Videos Entity
//!
//! Time-bounded media. Callers below `required_vip_level` still receive the
//! row, degraded to `preview_duration` seconds of playback.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                 Uuid,
    pub title:              String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description:        Option<String>,
    pub video_url:          String,
    pub thumbnail_url:      Option<String>,
    /// Full playback length in seconds
    pub duration:           i32,
    /// Playback length served to preview-only callers, in seconds
    pub preview_duration:   i32,
    pub required_vip_level: i32,
    pub view_count:         i32,
    pub category_id:        Option<Uuid>,
    pub is_active:          bool,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub updated_at:         chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::video_tags::Entity")]
    VideoTags,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef { super::video_tags::Relation::Tag.def() }

    fn via() -> Option<RelationDef> { Some(super::video_tags::Relation::Video.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
