use crate::config::PaginationConfig;
use crate::entities::promo_codes;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct PromoCodeService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

/// A promo code redeems only while active, unexpired and under its usage
/// limit. A missing limit or expiry never restricts.
pub fn is_valid_at(promo: &promo_codes::Model, now: DateTime<Utc>) -> bool {
    if !promo.is_active {
        return false;
    }
    if let Some(expires_at) = promo.expires_at {
        // A code expiring at this exact instant still redeems.
        if expires_at < now {
            return false;
        }
    }
    if let Some(limit) = promo.usage_limit {
        if promo.usage_count >= limit {
            return false;
        }
    }
    true
}

/// Atomic usage_count bump, issued after a payment referencing the code has
/// been recorded. Never called speculatively.
pub(crate) async fn increment_usage(pool: &DatabaseConnection, id: i32) -> AppResult<()> {
    promo_codes::Entity::update_many()
        .col_expr(
            promo_codes::Column::UsageCount,
            Expr::col(promo_codes::Column::UsageCount).add(1),
        )
        .col_expr(promo_codes::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(promo_codes::Column::Id.eq(id))
        .exec(pool)
        .await?;
    Ok(())
}

impl PromoCodeService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreatePromoCodeDto) -> AppResult<PromoCodeResponse> {
        validate_discounts(dto.discount_percent, dto.discount_amount, dto.usage_limit)?;
        let expires_at = parse_expiry(dto.expires_at.as_deref())?;
        self.check_code_unique(&dto.code, None).await?;

        let promo = promo_codes::ActiveModel {
            code: Set(dto.code),
            discount_percent: Set(dto.discount_percent),
            discount_amount: Set(dto.discount_amount),
            is_active: Set(dto.is_active.unwrap_or(true)),
            usage_limit: Set(dto.usage_limit),
            expires_at: Set(expires_at),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(PromoCodeResponse::from(promo))
    }

    pub async fn find_all(
        &self,
        query: &FindPromoCodesQuery,
    ) -> AppResult<PaginatedResponse<PromoCodeResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;

        let mut condition = Condition::all();
        if let Some(is_active) = query.is_active {
            condition = condition.add(promo_codes::Column::IsActive.eq(is_active));
        }

        let page_query = promo_codes::Entity::find()
            .filter(condition.clone())
            .order_by_desc(promo_codes::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = promo_codes::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (promos, total) = tokio::try_join!(page_query, count_query)?;

        let items = promos.into_iter().map(PromoCodeResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<PromoCodeResponse> {
        let promo = self.find_model(id).await?;
        Ok(PromoCodeResponse::from(promo))
    }

    pub async fn find_by_code(&self, code: &str) -> AppResult<PromoCodeResponse> {
        let promo = promo_codes::Entity::find()
            .filter(promo_codes::Column::Code.eq(code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promo code {code} not found")))?;

        Ok(PromoCodeResponse::from(promo))
    }

    /// Reports whether a code would redeem right now. An unknown code is
    /// simply invalid, not an error.
    pub async fn validate_code(&self, code: &str) -> AppResult<ValidatePromoCodeResponse> {
        let promo = promo_codes::Entity::find()
            .filter(promo_codes::Column::Code.eq(code))
            .one(&self.pool)
            .await?;

        let is_valid = promo
            .map(|promo| is_valid_at(&promo, Utc::now()))
            .unwrap_or(false);
        Ok(ValidatePromoCodeResponse { is_valid })
    }

    pub async fn update(&self, id: i32, dto: UpdatePromoCodeDto) -> AppResult<PromoCodeResponse> {
        validate_discounts(dto.discount_percent, dto.discount_amount, dto.usage_limit)?;
        let promo = self.find_model(id).await?;

        if let Some(code) = dto.code.as_deref() {
            self.check_code_unique(code, Some(id)).await?;
        }

        let mut model = promo.into_active_model();
        if let Some(code) = dto.code {
            model.code = Set(code);
        }
        if let Some(discount_percent) = dto.discount_percent {
            model.discount_percent = Set(Some(discount_percent));
        }
        if let Some(discount_amount) = dto.discount_amount {
            model.discount_amount = Set(Some(discount_amount));
        }
        if let Some(is_active) = dto.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(usage_limit) = dto.usage_limit {
            model.usage_limit = Set(Some(usage_limit));
        }
        if let Some(expires_at) = parse_expiry(dto.expires_at.as_deref())? {
            model.expires_at = Set(Some(expires_at));
        }
        model.updated_at = Set(Utc::now());
        let promo = model.update(&self.pool).await?;

        Ok(PromoCodeResponse::from(promo))
    }

    pub async fn remove(&self, id: i32) -> AppResult<PromoCodeResponse> {
        let promo = self.find_model(id).await?;
        promo_codes::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        Ok(PromoCodeResponse::from(promo))
    }

    async fn find_model(&self, id: i32) -> AppResult<promo_codes::Model> {
        promo_codes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promo code with ID {id} not found")))
    }

    async fn check_code_unique(&self, code: &str, exclude_id: Option<i32>) -> AppResult<()> {
        let mut query =
            promo_codes::Entity::find().filter(promo_codes::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(promo_codes::Column::Id.ne(id));
        }

        if query.one(&self.pool).await?.is_some() {
            return Err(AppError::Conflict(
                "Promo code with this code already exists".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_discounts(
    discount_percent: Option<i32>,
    discount_amount: Option<i64>,
    usage_limit: Option<i32>,
) -> AppResult<()> {
    if let Some(percent) = discount_percent {
        if !(0..=100).contains(&percent) {
            return Err(AppError::ValidationError(
                "discountPercent must be between 0 and 100".to_string(),
            ));
        }
    }
    if let Some(amount) = discount_amount {
        if amount < 0 {
            return Err(AppError::ValidationError(
                "discountAmount must not be negative".to_string(),
            ));
        }
    }
    if let Some(limit) = usage_limit {
        if limit < 1 {
            return Err(AppError::ValidationError(
                "usageLimit must be at least 1".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_expiry(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                AppError::ValidationError(format!("Invalid expiresAt timestamp: {raw}"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn promo(is_active: bool, expires_in: Option<i64>, limit: Option<i32>, used: i32) -> promo_codes::Model {
        promo_codes::Model {
            id: 1,
            code: "WELCOME10".to_string(),
            discount_percent: Some(10),
            discount_amount: None,
            is_active,
            usage_limit: limit,
            usage_count: used,
            expires_at: expires_in.map(|h| Utc::now() + Duration::hours(h)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validity_requires_active_flag() {
        assert!(is_valid_at(&promo(true, None, None, 0), Utc::now()));
        assert!(!is_valid_at(&promo(false, None, None, 0), Utc::now()));
    }

    #[test]
    fn test_validity_honours_expiry() {
        assert!(is_valid_at(&promo(true, Some(1), None, 0), Utc::now()));
        assert!(!is_valid_at(&promo(true, Some(-1), None, 0), Utc::now()));
    }

    #[test]
    fn test_validity_at_exact_expiry_instant() {
        let now = Utc::now();
        let mut code = promo(true, None, None, 0);
        code.expires_at = Some(now);
        assert!(is_valid_at(&code, now));
    }

    #[test]
    fn test_validity_honours_usage_limit() {
        assert!(is_valid_at(&promo(true, None, Some(5), 4), Utc::now()));
        assert!(!is_valid_at(&promo(true, None, Some(5), 5), Utc::now()));
        assert!(!is_valid_at(&promo(true, None, Some(5), 6), Utc::now()));
    }

    #[test]
    fn test_discount_percent_bounds() {
        assert!(validate_discounts(Some(0), None, None).is_ok());
        assert!(validate_discounts(Some(100), None, None).is_ok());
        assert!(validate_discounts(Some(101), None, None).is_err());
        assert!(validate_discounts(Some(-1), None, None).is_err());
        assert!(validate_discounts(None, Some(-5), None).is_err());
        assert!(validate_discounts(None, None, Some(0)).is_err());
    }

    #[tokio::test]
    async fn test_increment_usage_issues_single_update() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        increment_usage(&db, 5).await.unwrap();
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(format!("{:?}", log[0]).contains("usage_count"));
    }

    #[tokio::test]
    async fn test_validate_unknown_code_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<promo_codes::Model>::new()])
            .into_connection();
        let service = PromoCodeService::new(db, PaginationConfig::default());

        let response = service.validate_code("NOPE").await.unwrap();
        assert!(!response.is_valid);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![promo(true, None, None, 0)]])
            .into_connection();
        let service = PromoCodeService::new(db, PaginationConfig::default());

        let dto = CreatePromoCodeDto {
            code: "WELCOME10".to_string(),
            discount_percent: Some(10),
            discount_amount: None,
            is_active: None,
            usage_limit: None,
            expires_at: None,
        };
        let err = service.create(dto).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
