use crate::entities::promo_codes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromoCodeDto {
    pub code: String,
    /// 0-100.
    pub discount_percent: Option<i32>,
    /// Discount in kopecks, >= 0.
    pub discount_amount: Option<i64>,
    /// Defaults to true when absent.
    pub is_active: Option<bool>,
    /// Maximum number of redemptions, >= 1.
    pub usage_limit: Option<i32>,
    /// ISO-8601 expiry timestamp.
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromoCodeDto {
    pub code: Option<String>,
    pub discount_percent: Option<i32>,
    pub discount_amount: Option<i64>,
    pub is_active: Option<bool>,
    pub usage_limit: Option<i32>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindPromoCodesQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeResponse {
    pub id: i32,
    pub code: String,
    pub discount_percent: Option<i32>,
    pub discount_amount: Option<i64>,
    pub is_active: bool,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<promo_codes::Model> for PromoCodeResponse {
    fn from(promo: promo_codes::Model) -> Self {
        Self {
            id: promo.id,
            code: promo.code,
            discount_percent: promo.discount_percent,
            discount_amount: promo.discount_amount,
            is_active: promo.is_active,
            usage_limit: promo.usage_limit,
            usage_count: promo.usage_count,
            expires_at: promo.expires_at,
            created_at: promo.created_at,
            updated_at: promo.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoCodeResponse {
    pub is_valid: bool,
}
