use crate::config::PaginationConfig;
use crate::entities::{payments, promo_codes, PaymentStatus};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::promo_code_service::{self, is_valid_at};
use crate::utils::{contains_ci, DateRange};
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct PaymentService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

impl PaymentService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreatePaymentDto) -> AppResult<PaymentResponse> {
        if dto.amount < 1 {
            return Err(AppError::ValidationError(
                "amount must be at least 1".to_string(),
            ));
        }

        let promo = match dto.promo_code_id {
            Some(promo_id) => Some(self.checked_promo(promo_id).await?),
            None => None,
        };

        let payment = payments::ActiveModel {
            full_name: Set(dto.full_name),
            email: Set(dto.email),
            source: Set(dto.source),
            product: Set(dto.product),
            amount: Set(dto.amount),
            promo_code_id: Set(dto.promo_code_id),
            status: Set(dto.status.unwrap_or(PaymentStatus::Pending)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        // The payment row is already committed, so a failed counter bump is
        // reported to operators rather than rolled back.
        if let Some(promo) = &promo {
            if let Err(e) = promo_code_service::increment_usage(&self.pool, promo.id).await {
                log::error!(
                    "Failed to increment usage for promo code {} after payment {}: {e}",
                    promo.code,
                    payment.id
                );
            }
        }

        Ok(PaymentResponse::from((payment, promo)))
    }

    pub async fn find_all(
        &self,
        query: &FindPaymentsQuery,
    ) -> AppResult<PaginatedResponse<PaymentResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;
        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;

        let mut condition = Condition::all();
        if let Some(status) = &query.status {
            condition = condition.add(payments::Column::Status.eq(status.clone()));
        }
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(payments::Column::FullName, search))
                    .add(contains_ci(payments::Column::Email, search))
                    .add(contains_ci(payments::Column::Product, search))
                    .add(contains_ci(payments::Column::Source, search)),
            );
        }
        condition = date_range.apply(condition, payments::Column::CreatedAt);

        let page_query = payments::Entity::find()
            .filter(condition.clone())
            .order_by_desc(payments::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .find_also_related(promo_codes::Entity)
            .all(&self.pool);
        let count_query = payments::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (payments, total) = tokio::try_join!(page_query, count_query)?;

        let items = payments.into_iter().map(PaymentResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<PaymentResponse> {
        let payment = payments::Entity::find_by_id(id)
            .find_also_related(promo_codes::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with ID {id} not found")))?;

        Ok(PaymentResponse::from(payment))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Vec<PaymentResponse>> {
        let payments = payments::Entity::find()
            .filter(payments::Column::Email.eq(email))
            .order_by_desc(payments::Column::CreatedAt)
            .find_also_related(promo_codes::Entity)
            .all(&self.pool)
            .await?;

        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    /// Pending/completed counts plus the completed revenue over an optional
    /// created_at window.
    pub async fn stats(&self, query: &StatsDateQuery) -> AppResult<PaymentStatsResponse> {
        #[derive(Debug, FromQueryResult)]
        struct SumRow {
            total: Option<i64>,
        }

        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;
        let window = date_range.apply(Condition::all(), payments::Column::CreatedAt);

        let pending = payments::Entity::find()
            .filter(window.clone())
            .filter(payments::Column::Status.eq(PaymentStatus::Pending))
            .count(&self.pool)
            .await?;
        let completed_filter = window.add(payments::Column::Status.eq(PaymentStatus::Completed));
        let completed = payments::Entity::find()
            .filter(completed_filter.clone())
            .count(&self.pool)
            .await?;

        // SUM over bigint yields numeric on Postgres, cast back for i64.
        let sum = payments::Entity::find()
            .select_only()
            .column_as(
                Expr::col(payments::Column::Amount)
                    .sum()
                    .cast_as(Alias::new("bigint")),
                "total",
            )
            .filter(completed_filter)
            .into_model::<SumRow>()
            .one(&self.pool)
            .await?;

        Ok(PaymentStatsResponse {
            pending,
            completed,
            total_amount: sum.and_then(|row| row.total).unwrap_or(0),
        })
    }

    pub async fn update(&self, id: i32, dto: UpdatePaymentDto) -> AppResult<PaymentResponse> {
        if let Some(amount) = dto.amount {
            if amount < 1 {
                return Err(AppError::ValidationError(
                    "amount must be at least 1".to_string(),
                ));
            }
        }
        let payment = self.find_model(id).await?;

        if let Some(promo_id) = dto.promo_code_id {
            self.checked_promo(promo_id).await?;
        }

        let mut model = payment.into_active_model();
        if let Some(full_name) = dto.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(email) = dto.email {
            model.email = Set(email);
        }
        if let Some(source) = dto.source {
            model.source = Set(source);
        }
        if let Some(product) = dto.product {
            model.product = Set(product);
        }
        if let Some(amount) = dto.amount {
            model.amount = Set(amount);
        }
        if let Some(promo_id) = dto.promo_code_id {
            model.promo_code_id = Set(Some(promo_id));
        }
        if let Some(status) = dto.status {
            model.status = Set(status);
        }
        model.updated_at = Set(Utc::now());
        let payment = model.update(&self.pool).await?;

        self.find_one(payment.id).await
    }

    pub async fn remove(&self, id: i32) -> AppResult<PaymentResponse> {
        let payment = self.find_one(id).await?;
        payments::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(payment)
    }

    async fn find_model(&self, id: i32) -> AppResult<payments::Model> {
        payments::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with ID {id} not found")))
    }

    /// Resolves a promo code and rejects payments against codes that would
    /// not redeem right now.
    async fn checked_promo(&self, promo_id: i32) -> AppResult<promo_codes::Model> {
        let promo = promo_codes::Entity::find_by_id(promo_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Promo code with ID {promo_id} not found"))
            })?;

        if !is_valid_at(&promo, Utc::now()) {
            return Err(AppError::BusinessRule(
                "Promo code is invalid or expired".to_string(),
            ));
        }
        Ok(promo)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn promo(id: i32, is_active: bool, expires_in_hours: Option<i64>) -> promo_codes::Model {
        promo_codes::Model {
            id,
            code: "WELCOME10".to_string(),
            discount_percent: Some(10),
            discount_amount: None,
            is_active,
            usage_limit: None,
            usage_count: 0,
            expires_at: expires_in_hours.map(|h| Utc::now() + Duration::hours(h)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payment_model(id: i32, promo_code_id: Option<i32>) -> payments::Model {
        payments::Model {
            id,
            full_name: "Ivan Ivanov".to_string(),
            email: "ivan@example.com".to_string(),
            source: "Website".to_string(),
            product: "Course".to_string(),
            amount: 99_000,
            promo_code_id,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_dto(amount: i64, promo_code_id: Option<i32>) -> CreatePaymentDto {
        CreatePaymentDto {
            full_name: "Ivan Ivanov".to_string(),
            email: "ivan@example.com".to_string(),
            source: "Website".to_string(),
            product: "Course".to_string(),
            amount,
            promo_code_id,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = PaymentService::new(db, PaginationConfig::default());

        let err = service.create(create_dto(0, None)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        // Validation fails before any storage call.
        assert!(service.pool.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_expired_promo_without_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![promo(5, true, Some(-1))]])
            .into_connection();
        let service = PaymentService::new(db, PaginationConfig::default());

        let err = service.create(create_dto(99_000, Some(5))).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_create_with_promo_bumps_usage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![promo(5, true, Some(24))]])
            .append_query_results([vec![payment_model(1, Some(5))]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = PaymentService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(99_000, Some(5))).await.unwrap();
        assert_eq!(response.promo_code.as_ref().map(|p| p.id), Some(5));
        // Promo lookup, payment insert, usage increment.
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 3);
    }

    #[tokio::test]
    async fn test_create_without_promo_skips_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![payment_model(1, None)]])
            .into_connection();
        let service = PaymentService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(99_000, None)).await.unwrap();
        assert!(response.promo_code.is_none());
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 1);
    }
}
