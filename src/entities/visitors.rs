use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::EnumIter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "visitors")]
pub struct Model {
    /// Opaque UUIDv4 assigned by the service, not a sequential id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub traffic_source: String,
    pub utm_tags: Option<String>,
    pub country: String,
    pub device: String,
    pub browser: String,
    pub pages_viewed: Option<i32>,
    pub time_on_site: String,
    pub cookie_file: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
