use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "requisite_type")]
pub enum RequisiteType {
    #[sea_orm(string_value = "Card")]
    Card,
    #[sea_orm(string_value = "Yoomoney")]
    Yoomoney,
    #[sea_orm(string_value = "Crypto")]
    Crypto,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "partner_bonus_status"
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerBonusStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl std::fmt::Display for PartnerBonusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerBonusStatus::Pending => write!(f, "PENDING"),
            PartnerBonusStatus::Completed => write!(f, "COMPLETED"),
            PartnerBonusStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub requisites: String,
    pub requisite_type: RequisiteType,
    pub bonus_status: PartnerBonusStatus,
    #[sea_orm(unique)]
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
