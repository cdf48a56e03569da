use crate::entities::{partners, PartnerBonusStatus, RequisiteType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerDto {
    pub name: String,
    pub username: String,
    pub requisites: String,
    pub requisite_type: RequisiteType,
    pub bonus_status: PartnerBonusStatus,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerDto {
    pub name: Option<String>,
    pub username: Option<String>,
    pub requisites: Option<String>,
    pub requisite_type: Option<RequisiteType>,
    pub bonus_status: Option<PartnerBonusStatus>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindPartnersQuery {
    /// Case-insensitive search by username.
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub requisites: String,
    pub requisite_type: RequisiteType,
    pub bonus_status: PartnerBonusStatus,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl From<partners::Model> for PartnerResponse {
    fn from(partner: partners::Model) -> Self {
        Self {
            id: partner.id,
            name: partner.name,
            username: partner.username,
            requisites: partner.requisites,
            requisite_type: partner.requisite_type,
            bonus_status: partner.bonus_status,
            code: partner.code,
            created_at: partner.created_at,
        }
    }
}
