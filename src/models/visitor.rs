use crate::entities::visitors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitorDto {
    pub traffic_source: String,
    pub utm_tags: Option<String>,
    pub country: String,
    pub device: String,
    pub browser: String,
    /// >= 1 when present.
    pub pages_viewed: Option<i32>,
    pub time_on_site: String,
    pub cookie_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitorDto {
    pub traffic_source: Option<String>,
    pub utm_tags: Option<String>,
    pub country: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub pages_viewed: Option<i32>,
    pub time_on_site: Option<String>,
    pub cookie_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindVisitorsQuery {
    /// Case-insensitive search over traffic source, country, device, browser.
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub country: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub traffic_source: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
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

impl From<visitors::Model> for VisitorResponse {
    fn from(visitor: visitors::Model) -> Self {
        Self {
            id: visitor.id,
            traffic_source: visitor.traffic_source,
            utm_tags: visitor.utm_tags,
            country: visitor.country,
            device: visitor.device,
            browser: visitor.browser,
            pages_viewed: visitor.pages_viewed,
            time_on_site: visitor.time_on_site,
            cookie_file: visitor.cookie_file,
            created_at: visitor.created_at,
            updated_at: visitor.updated_at,
        }
    }
}
