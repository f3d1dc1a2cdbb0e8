//! Users Entity
//!
//! Members and administrators. `vip_level` is ordinal in `[1, 6]`; `is_active`
//! gates both login and refresh.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    #[sea_orm(unique)]
    pub username:      String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email:         Option<String>,
    pub vip_level:     i32,
    pub is_admin:      bool,
    pub is_active:     bool,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::refresh_tokens::Entity")]
    RefreshTokens,
}

impl Related<super::refresh_tokens::Entity> for Entity {
    fn to() -> RelationDef { Relation::RefreshTokens.def() }
}

impl ActiveModelBehavior for ActiveModel {}
