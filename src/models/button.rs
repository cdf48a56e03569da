use crate::entities::buttons;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateButtonDto {
    pub name: String,
    #[serde(rename = "type")]
    pub button_type: String,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Defaults to true when absent.
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateButtonDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub button_type: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickDto {
    pub name: String,
    #[serde(rename = "type")]
    pub button_type: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindButtonsQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Filter on updated_at instead of created_at.
    pub filter_by_updated: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ButtonResponse {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub button_type: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub click_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<buttons::Model> for ButtonResponse {
    fn from(button: buttons::Model) -> Self {
        Self {
            id: button.id,
            name: button.name,
            button_type: button.button_type,
            url: button.url,
            description: button.description,
            is_active: button.is_active,
            click_count: button.click_count,
            created_at: button.created_at,
            updated_at: button.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ButtonClickStats {
    #[serde(rename = "type")]
    pub button_type: String,
    pub total_clicks: i64,
    pub button_count: i64,
}
