use crate::config::PaginationConfig;
use crate::entities::notifications;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_ci, DateRange};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct NotificationService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreateNotificationDto) -> AppResult<NotificationResponse> {
        let end = parse_end(&dto.end)?;

        let notification = notifications::ActiveModel {
            text: Set(dto.text),
            end: Set(end),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(NotificationResponse::from(notification))
    }

    pub async fn find_all(
        &self,
        query: &FindNotificationsQuery,
    ) -> AppResult<PaginatedResponse<NotificationResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;
        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;

        let mut condition = Condition::all();
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(contains_ci(notifications::Column::Text, search));
        }
        condition = date_range.apply(condition, notifications::Column::CreatedAt);

        let page_query = notifications::Entity::find()
            .filter(condition.clone())
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = notifications::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (notifications, total) = tokio::try_join!(page_query, count_query)?;

        let items = notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    /// Notifications whose end timestamp has not passed yet.
    pub async fn find_active(&self) -> AppResult<Vec<NotificationResponse>> {
        let notifications = notifications::Entity::find()
            .filter(notifications::Column::End.gt(Utc::now()))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> AppResult<NotificationResponse> {
        let notification = self.find_model(id).await?;
        Ok(NotificationResponse::from(notification))
    }

    pub async fn update(
        &self,
        id: i32,
        dto: UpdateNotificationDto,
    ) -> AppResult<NotificationResponse> {
        let notification = self.find_model(id).await?;

        let mut model = notification.into_active_model();
        if let Some(text) = dto.text {
            model.text = Set(text);
        }
        if let Some(end) = dto.end.as_deref() {
            model.end = Set(parse_end(end)?);
        }
        model.updated_at = Set(Utc::now());
        let notification = model.update(&self.pool).await?;

        Ok(NotificationResponse::from(notification))
    }

    pub async fn remove(&self, id: i32) -> AppResult<NotificationResponse> {
        let notification = self.find_model(id).await?;
        notifications::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        Ok(NotificationResponse::from(notification))
    }

    async fn find_model(&self, id: i32) -> AppResult<notifications::Model> {
        notifications::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification with ID {id} not found")))
    }
}

fn parse_end(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::ValidationError(format!("Invalid end timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn notification_model(id: i32, text: &str) -> notifications::Model {
        notifications::Model {
            id,
            text: text.to_string(),
            end: Utc::now() + chrono::Duration::days(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_end() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = NotificationService::new(db, PaginationConfig::default());

        let dto = CreateNotificationDto {
            text: "Maintenance tonight".to_string(),
            end: "tomorrow".to_string(),
        };
        let err = service.create(dto).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(service.pool.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_create_parses_end() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![notification_model(1, "Maintenance tonight")]])
            .into_connection();
        let service = NotificationService::new(db, PaginationConfig::default());

        let dto = CreateNotificationDto {
            text: "Maintenance tonight".to_string(),
            end: "2026-09-01T22:00:00Z".to_string(),
        };
        let response = service.create(dto).await.unwrap();
        assert_eq!(response.id, 1);
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<notifications::Model>::new()])
            .into_connection();
        let service = NotificationService::new(db, PaginationConfig::default());

        let err = service.find_one(3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
