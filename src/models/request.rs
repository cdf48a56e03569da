use crate::entities::{requests, RequestStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestDto {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub telegram: Option<String>,
    pub partner_code: Option<String>,
    pub source: String,
    /// Defaults to PENDING when absent.
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestDto {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub telegram: Option<String>,
    pub partner_code: Option<String>,
    pub source: Option<String>,
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindRequestsQuery {
    /// Case-insensitive search over full name and telegram.
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<RequestStatus>,
    pub source: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub telegram: Option<String>,
    pub partner_code: Option<String>,
    pub source: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<requests::Model> for RequestResponse {
    fn from(request: requests::Model) -> Self {
        Self {
            id: request.id,
            full_name: request.full_name,
            phone: request.phone,
            email: request.email,
            telegram: request.telegram,
            partner_code: request.partner_code,
            source: request.source,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
