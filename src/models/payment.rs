use crate::entities::{payments, promo_codes, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentDto {
    pub full_name: String,
    pub email: String,
    pub source: String,
    pub product: String,
    /// Amount in kopecks, must be >= 1.
    pub amount: i64,
    pub promo_code_id: Option<i32>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentDto {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub product: Option<String>,
    pub amount: Option<i64>,
    pub promo_code_id: Option<i32>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindPaymentsQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<PaymentStatus>,
    /// Case-insensitive search over full name, email, product and source.
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDateQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// The slice of a promo code exposed on payment responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeInfo {
    pub id: i32,
    pub code: String,
    pub discount_percent: Option<i32>,
    pub discount_amount: Option<i64>,
}

impl From<promo_codes::Model> for PromoCodeInfo {
    fn from(promo: promo_codes::Model) -> Self {
        Self {
            id: promo.id,
            code: promo.code,
            discount_percent: promo.discount_percent,
            discount_amount: promo.discount_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub source: String,
    pub product: String,
    pub amount: i64,
    pub promo_code_id: Option<i32>,
    pub promo_code: Option<PromoCodeInfo>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<(payments::Model, Option<promo_codes::Model>)> for PaymentResponse {
    fn from((payment, promo): (payments::Model, Option<promo_codes::Model>)) -> Self {
        Self {
            id: payment.id,
            full_name: payment.full_name,
            email: payment.email,
            source: payment.source,
            product: payment.product,
            amount: payment.amount,
            promo_code_id: payment.promo_code_id,
            promo_code: promo.map(PromoCodeInfo::from),
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsResponse {
    pub pending: u64,
    pub completed: u64,
    /// Sum of completed payment amounts, in kopecks.
    pub total_amount: i64,
}
