use crate::config::PaginationConfig;
use crate::entities::buttons;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::DateRange;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct ButtonService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

/// The list date window targets created_at by default, updated_at when the
/// filterByUpdated flag is set.
fn list_window(query: &FindButtonsQuery) -> AppResult<Condition> {
    let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;
    let date_column = if query.filter_by_updated.unwrap_or(false) {
        buttons::Column::UpdatedAt
    } else {
        buttons::Column::CreatedAt
    };
    Ok(date_range.apply(Condition::all(), date_column))
}

impl ButtonService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreateButtonDto) -> AppResult<ButtonResponse> {
        let button = buttons::ActiveModel {
            name: Set(dto.name),
            button_type: Set(dto.button_type),
            url: Set(dto.url),
            description: Set(dto.description),
            is_active: Set(dto.is_active.unwrap_or(true)),
            click_count: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ButtonResponse::from(button))
    }

    pub async fn find_all(
        &self,
        query: &FindButtonsQuery,
    ) -> AppResult<PaginatedResponse<ButtonResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;
        let condition = list_window(query)?;

        let page_query = buttons::Entity::find()
            .filter(condition.clone())
            .order_by_desc(buttons::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = buttons::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (buttons, total) = tokio::try_join!(page_query, count_query)?;

        let items = buttons.into_iter().map(ButtonResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<ButtonResponse> {
        let button = self.find_model(id).await?;
        Ok(ButtonResponse::from(button))
    }

    pub async fn update(&self, id: i32, dto: UpdateButtonDto) -> AppResult<ButtonResponse> {
        let button = self.find_model(id).await?;

        let mut model = button.into_active_model();
        if let Some(name) = dto.name {
            model.name = Set(name);
        }
        if let Some(button_type) = dto.button_type {
            model.button_type = Set(button_type);
        }
        if let Some(url) = dto.url {
            model.url = Set(Some(url));
        }
        if let Some(description) = dto.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = dto.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(Utc::now());
        let button = model.update(&self.pool).await?;

        Ok(ButtonResponse::from(button))
    }

    pub async fn remove(&self, id: i32) -> AppResult<ButtonResponse> {
        let button = self.find_model(id).await?;
        buttons::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(ButtonResponse::from(button))
    }

    pub async fn increment_click(&self, id: i32) -> AppResult<ButtonResponse> {
        let button = self.find_model(id).await?;

        let mut model = button.into_active_model();
        model.click_count = Set(model.click_count.take().unwrap_or(0) + 1);
        model.updated_at = Set(Utc::now());
        let button = model.update(&self.pool).await?;

        Ok(ButtonResponse::from(button))
    }

    /// Upsert keyed by button name: a known button gets its counter bumped,
    /// an unknown one is registered with a single click.
    pub async fn track_click(&self, dto: TrackClickDto) -> AppResult<ButtonResponse> {
        let existing = buttons::Entity::find()
            .filter(buttons::Column::Name.eq(dto.name.as_str()))
            .one(&self.pool)
            .await?;

        let button = match existing {
            Some(button) => {
                let mut model = button.into_active_model();
                model.click_count = Set(model.click_count.take().unwrap_or(0) + 1);
                model.updated_at = Set(Utc::now());
                model.update(&self.pool).await?
            }
            None => {
                buttons::ActiveModel {
                    name: Set(dto.name),
                    button_type: Set(dto.button_type.unwrap_or_else(|| "action".to_string())),
                    url: Set(dto.url),
                    description: Set(Some(
                        "Auto-created button from frontend tracking".to_string(),
                    )),
                    is_active: Set(true),
                    click_count: Set(1),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        Ok(ButtonResponse::from(button))
    }

    /// Per-type click totals over an optional updated_at window.
    pub async fn click_stats(&self, query: &StatsDateQuery) -> AppResult<Vec<ButtonClickStats>> {
        #[derive(Debug, FromQueryResult)]
        struct TypeStatsRow {
            button_type: String,
            total_clicks: Option<i64>,
            button_count: i64,
        }

        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;
        let condition = date_range.apply(Condition::all(), buttons::Column::UpdatedAt);

        let rows = buttons::Entity::find()
            .select_only()
            .column_as(Expr::col(buttons::Column::ButtonType), "button_type")
            .column_as(Expr::col(buttons::Column::ClickCount).sum(), "total_clicks")
            .column_as(Expr::col(buttons::Column::Id).count(), "button_count")
            .filter(condition)
            .group_by(buttons::Column::ButtonType)
            .into_model::<TypeStatsRow>()
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ButtonClickStats {
                button_type: row.button_type,
                total_clicks: row.total_clicks.unwrap_or(0),
                button_count: row.button_count,
            })
            .collect())
    }

    async fn find_model(&self, id: i32) -> AppResult<buttons::Model> {
        buttons::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Button with ID {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryTrait};

    fn window_query(filter_by_updated: Option<bool>) -> FindButtonsQuery {
        FindButtonsQuery {
            page: None,
            page_size: None,
            date_from: Some("2024-01-01T00:00:00.000Z".to_string()),
            date_to: Some("2024-12-31T23:59:59.999Z".to_string()),
            filter_by_updated,
        }
    }

    fn window_sql(filter_by_updated: Option<bool>) -> String {
        let condition = list_window(&window_query(filter_by_updated)).unwrap();
        buttons::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_list_window_defaults_to_created_at() {
        let sql = window_sql(None);
        assert!(sql.contains("\"created_at\" >="));
        assert!(!sql.contains("\"updated_at\" >="));
    }

    #[test]
    fn test_list_window_switches_to_updated_at() {
        let sql = window_sql(Some(true));
        assert!(sql.contains("\"updated_at\" >="));
        assert!(sql.contains("\"updated_at\" <="));
        assert!(!sql.contains("\"created_at\" >="));
    }

    fn button_model(id: i32, name: &str, clicks: i32) -> buttons::Model {
        buttons::Model {
            id,
            name: name.to_string(),
            button_type: "action".to_string(),
            url: Some("https://example.com".to_string()),
            description: None,
            is_active: true,
            click_count: clicks,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_track_click_bumps_existing_button() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![button_model(1, "cta", 4)]])
            .append_query_results([vec![button_model(1, "cta", 5)]])
            .into_connection();
        let service = ButtonService::new(db, PaginationConfig::default());

        let dto = TrackClickDto {
            name: "cta".to_string(),
            button_type: None,
            url: None,
        };
        let response = service.track_click(dto).await.unwrap();
        assert_eq!(response.click_count, 5);
    }

    #[tokio::test]
    async fn test_track_click_registers_unknown_button() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<buttons::Model>::new()])
            .append_query_results([vec![buttons::Model {
                description: Some("Auto-created button from frontend tracking".to_string()),
                click_count: 1,
                ..button_model(2, "signup", 1)
            }]])
            .into_connection();
        let service = ButtonService::new(db, PaginationConfig::default());

        let dto = TrackClickDto {
            name: "signup".to_string(),
            button_type: None,
            url: None,
        };
        let response = service.track_click(dto).await.unwrap();
        assert_eq!(response.click_count, 1);
        assert!(response.description.unwrap().contains("Auto-created"));
        // Lookup then insert.
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_click_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<buttons::Model>::new()])
            .into_connection();
        let service = ButtonService::new(db, PaginationConfig::default());

        let err = service.increment_click(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
