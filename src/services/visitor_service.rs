use crate::config::PaginationConfig;
use crate::entities::visitors;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_ci, DateRange};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct VisitorService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

impl VisitorService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreateVisitorDto) -> AppResult<VisitorResponse> {
        if let Some(pages) = dto.pages_viewed {
            if pages < 1 {
                return Err(AppError::ValidationError(
                    "pagesViewed must be at least 1".to_string(),
                ));
            }
        }

        let visitor = visitors::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            traffic_source: Set(dto.traffic_source),
            utm_tags: Set(dto.utm_tags),
            country: Set(dto.country),
            device: Set(dto.device),
            browser: Set(dto.browser),
            pages_viewed: Set(dto.pages_viewed),
            time_on_site: Set(dto.time_on_site),
            cookie_file: Set(dto.cookie_file),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(VisitorResponse::from(visitor))
    }

    pub async fn find_all(
        &self,
        query: &FindVisitorsQuery,
    ) -> AppResult<PaginatedResponse<VisitorResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;
        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;

        let mut condition = Condition::all();
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(visitors::Column::TrafficSource, search))
                    .add(contains_ci(visitors::Column::Country, search))
                    .add(contains_ci(visitors::Column::Device, search))
                    .add(contains_ci(visitors::Column::Browser, search)),
            );
        }
        if let Some(country) = query.country.as_deref() {
            condition = condition.add(contains_ci(visitors::Column::Country, country));
        }
        if let Some(device) = query.device.as_deref() {
            condition = condition.add(contains_ci(visitors::Column::Device, device));
        }
        if let Some(browser) = query.browser.as_deref() {
            condition = condition.add(contains_ci(visitors::Column::Browser, browser));
        }
        if let Some(traffic_source) = query.traffic_source.as_deref() {
            condition = condition.add(contains_ci(
                visitors::Column::TrafficSource,
                traffic_source,
            ));
        }
        condition = date_range.apply(condition, visitors::Column::CreatedAt);

        let page_query = visitors::Entity::find()
            .filter(condition.clone())
            .order_by_desc(visitors::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = visitors::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (visitors, total) = tokio::try_join!(page_query, count_query)?;

        let items = visitors.into_iter().map(VisitorResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: &str) -> AppResult<VisitorResponse> {
        let visitor = self.find_model(id).await?;
        Ok(VisitorResponse::from(visitor))
    }

    /// Distinct values of a dimension with visitor counts, busiest first.
    /// Accepts country, device, browser or trafficSource.
    pub async fn stats_by(&self, field: &str) -> AppResult<HashMap<String, i64>> {
        #[derive(Debug, FromQueryResult)]
        struct ValueCountRow {
            value: String,
            count: i64,
        }

        let column = match field {
            "country" => visitors::Column::Country,
            "device" => visitors::Column::Device,
            "browser" => visitors::Column::Browser,
            "trafficSource" => visitors::Column::TrafficSource,
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unknown stats field: {other}"
                )))
            }
        };

        let rows = visitors::Entity::find()
            .select_only()
            .column_as(Expr::col(column), "value")
            .column_as(Expr::col(visitors::Column::Id).count(), "count")
            .group_by(column)
            .order_by(Expr::col(visitors::Column::Id).count(), Order::Desc)
            .into_model::<ValueCountRow>()
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| (row.value, row.count)).collect())
    }

    pub async fn update(&self, id: &str, dto: UpdateVisitorDto) -> AppResult<VisitorResponse> {
        if let Some(pages) = dto.pages_viewed {
            if pages < 1 {
                return Err(AppError::ValidationError(
                    "pagesViewed must be at least 1".to_string(),
                ));
            }
        }
        let visitor = self.find_model(id).await?;

        let mut model = visitor.into_active_model();
        if let Some(traffic_source) = dto.traffic_source {
            model.traffic_source = Set(traffic_source);
        }
        if let Some(utm_tags) = dto.utm_tags {
            model.utm_tags = Set(Some(utm_tags));
        }
        if let Some(country) = dto.country {
            model.country = Set(country);
        }
        if let Some(device) = dto.device {
            model.device = Set(device);
        }
        if let Some(browser) = dto.browser {
            model.browser = Set(browser);
        }
        if let Some(pages_viewed) = dto.pages_viewed {
            model.pages_viewed = Set(Some(pages_viewed));
        }
        if let Some(time_on_site) = dto.time_on_site {
            model.time_on_site = Set(time_on_site);
        }
        if let Some(cookie_file) = dto.cookie_file {
            model.cookie_file = Set(cookie_file);
        }
        model.updated_at = Set(Utc::now());
        let visitor = model.update(&self.pool).await?;

        Ok(VisitorResponse::from(visitor))
    }

    pub async fn remove(&self, id: &str) -> AppResult<VisitorResponse> {
        let visitor = self.find_model(id).await?;
        visitors::Entity::delete_by_id(id.to_string())
            .exec(&self.pool)
            .await?;
        Ok(VisitorResponse::from(visitor))
    }

    async fn find_model(&self, id: &str) -> AppResult<visitors::Model> {
        visitors::Entity::find_by_id(id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor with ID {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_dto(pages_viewed: Option<i32>) -> CreateVisitorDto {
        CreateVisitorDto {
            traffic_source: "google".to_string(),
            utm_tags: Some("utm_source=google".to_string()),
            country: "DE".to_string(),
            device: "desktop".to_string(),
            browser: "Firefox".to_string(),
            pages_viewed,
            time_on_site: "00:03:12".to_string(),
            cookie_file: "c0ffee".to_string(),
        }
    }

    fn visitor_model(id: &str) -> visitors::Model {
        visitors::Model {
            id: id.to_string(),
            traffic_source: "google".to_string(),
            utm_tags: Some("utm_source=google".to_string()),
            country: "DE".to_string(),
            device: "desktop".to_string(),
            browser: "Firefox".to_string(),
            pages_viewed: Some(3),
            time_on_site: "00:03:12".to_string(),
            cookie_file: "c0ffee".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_zero_pages_viewed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = VisitorService::new(db, PaginationConfig::default());

        let err = service.create(create_dto(Some(0))).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_assigns_uuid() {
        let id = Uuid::new_v4().to_string();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![visitor_model(&id)]])
            .into_connection();
        let service = VisitorService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(Some(3))).await.unwrap();
        assert!(Uuid::parse_str(&response.id).is_ok());
    }

    #[tokio::test]
    async fn test_stats_rejects_unknown_field() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = VisitorService::new(db, PaginationConfig::default());

        let err = service.stats_by("color").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<visitors::Model>::new()])
            .into_connection();
        let service = VisitorService::new(db, PaginationConfig::default());

        let err = service.find_one("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
