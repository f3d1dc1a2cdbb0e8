//! Images Entity
//!
//! Gated media with no preview entitlement: callers below
//! `required_vip_level` are hard-denied.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                 Uuid,
    pub title:              String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description:        Option<String>,
    pub image_url:          String,
    pub required_vip_level: i32,
    pub is_active:          bool,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub updated_at:         chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
