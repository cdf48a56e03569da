use crate::config::PaginationConfig;
use crate::entities::partners;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_ci, DateRange};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct PartnerService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

impl PartnerService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreatePartnerDto) -> AppResult<PartnerResponse> {
        // Pre-check for a friendlier, field-specific conflict message. The
        // unique constraints on username/code remain the authoritative guard.
        self.check_unique(Some(&dto.username), Some(&dto.code), None)
            .await?;

        let partner = partners::ActiveModel {
            name: Set(dto.name),
            username: Set(dto.username),
            requisites: Set(dto.requisites),
            requisite_type: Set(dto.requisite_type),
            bonus_status: Set(dto.bonus_status),
            code: Set(dto.code),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(PartnerResponse::from(partner))
    }

    pub async fn find_all(
        &self,
        query: &FindPartnersQuery,
    ) -> AppResult<PaginatedResponse<PartnerResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        )?;
        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;

        let mut condition = Condition::all();
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(contains_ci(partners::Column::Username, search));
        }
        condition = date_range.apply(condition, partners::Column::CreatedAt);

        let page_query = partners::Entity::find()
            .filter(condition.clone())
            .order_by_desc(partners::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = partners::Entity::find()
            .filter(condition)
            .count(&self.pool);
        // No shared snapshot between the two queries; accepted.
        let (partners, total) = tokio::try_join!(page_query, count_query)?;

        let items = partners.into_iter().map(PartnerResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<PartnerResponse> {
        let partner = self.find_model(id).await?;
        Ok(PartnerResponse::from(partner))
    }

    pub async fn find_by_code(&self, code: &str) -> AppResult<PartnerResponse> {
        let partner = partners::Entity::find()
            .filter(partners::Column::Code.eq(code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Partner with code {code} not found")))?;

        Ok(PartnerResponse::from(partner))
    }

    pub async fn update(&self, id: i32, dto: UpdatePartnerDto) -> AppResult<PartnerResponse> {
        let partner = self.find_model(id).await?;

        if dto.username.is_some() || dto.code.is_some() {
            self.check_unique(dto.username.as_deref(), dto.code.as_deref(), Some(id))
                .await?;
        }

        let mut model = partner.into_active_model();
        if let Some(name) = dto.name {
            model.name = Set(name);
        }
        if let Some(username) = dto.username {
            model.username = Set(username);
        }
        if let Some(requisites) = dto.requisites {
            model.requisites = Set(requisites);
        }
        if let Some(requisite_type) = dto.requisite_type {
            model.requisite_type = Set(requisite_type);
        }
        if let Some(bonus_status) = dto.bonus_status {
            model.bonus_status = Set(bonus_status);
        }
        if let Some(code) = dto.code {
            model.code = Set(code);
        }
        model.updated_at = Set(Utc::now());
        let partner = model.update(&self.pool).await?;

        Ok(PartnerResponse::from(partner))
    }

    pub async fn remove(&self, id: i32) -> AppResult<PartnerResponse> {
        let partner = self.find_model(id).await?;
        partners::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(PartnerResponse::from(partner))
    }

    async fn find_model(&self, id: i32) -> AppResult<partners::Model> {
        partners::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Partner with ID {id} not found")))
    }

    /// Uniqueness guard over username and code. Looks for any other partner
    /// holding one of the candidate values and reports which field collided.
    async fn check_unique(
        &self,
        username: Option<&str>,
        code: Option<&str>,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let mut candidates = Condition::any();
        if let Some(username) = username {
            candidates = candidates.add(partners::Column::Username.eq(username));
        }
        if let Some(code) = code {
            candidates = candidates.add(partners::Column::Code.eq(code));
        }

        let mut query = partners::Entity::find().filter(candidates);
        if let Some(id) = exclude_id {
            query = query.filter(partners::Column::Id.ne(id));
        }

        if let Some(existing) = query.one(&self.pool).await? {
            if username == Some(existing.username.as_str()) {
                return Err(AppError::Conflict(
                    "Partner with this username already exists".to_string(),
                ));
            }
            return Err(AppError::Conflict(
                "Partner with this code already exists".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PartnerBonusStatus, RequisiteType};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn partner_model(id: i32, username: &str, code: &str) -> partners::Model {
        partners::Model {
            id,
            name: "Acme Trading".to_string(),
            username: username.to_string(),
            requisites: "4111111111111111".to_string(),
            requisite_type: RequisiteType::Card,
            bonus_status: PartnerBonusStatus::Pending,
            code: code.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_dto(username: &str, code: &str) -> CreatePartnerDto {
        CreatePartnerDto {
            name: "Acme Trading".to_string(),
            username: username.to_string(),
            requisites: "4111111111111111".to_string(),
            requisite_type: RequisiteType::Card,
            bonus_status: PartnerBonusStatus::Pending,
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_conflict_names_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![partner_model(1, "alice", "P1")]])
            .into_connection();
        let service = PartnerService::new(db, PaginationConfig::default());

        let err = service
            .create(create_dto("alice", "P2"))
            .await
            .unwrap_err();
        match err {
            AppError::Conflict(msg) => assert!(msg.contains("username")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_conflict_names_code() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![partner_model(1, "alice", "P1")]])
            .into_connection();
        let service = PartnerService::new(db, PaginationConfig::default());

        let err = service.create(create_dto("bob", "P1")).await.unwrap_err();
        match err {
            AppError::Conflict(msg) => assert!(msg.contains("code")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_conflict_skips_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![partner_model(1, "alice", "P1")]])
            .into_connection();
        let service = PartnerService::new(db, PaginationConfig::default());

        let _ = service.create(create_dto("alice", "P2")).await;
        // Only the uniqueness pre-check hits the database.
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_create_inserts_when_unique() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<partners::Model>::new()])
            .append_query_results([vec![partner_model(7, "alice", "P1")]])
            .into_connection();
        let service = PartnerService::new(db, PaginationConfig::default());

        let response = service.create(create_dto("alice", "P1")).await.unwrap();
        assert_eq!(response.id, 7);
        assert_eq!(response.username, "alice");
        assert_eq!(response.code, "P1");
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<partners::Model>::new()])
            .into_connection();
        let service = PartnerService::new(db, PaginationConfig::default());

        let err = service.find_one(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
