use crate::config::PaginationConfig;
use crate::entities::{partners, requests, PartnerBonusStatus, RequestStatus};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_ci, DateRange};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

pub struct RequestService {
    pool: DatabaseConnection,
    pagination: PaginationConfig,
}

impl RequestService {
    pub fn new(pool: DatabaseConnection, pagination: PaginationConfig) -> Self {
        Self { pool, pagination }
    }

    pub async fn create(&self, dto: CreateRequestDto) -> AppResult<RequestResponse> {
        let request = requests::ActiveModel {
            full_name: Set(dto.full_name),
            phone: Set(dto.phone),
            email: Set(dto.email),
            telegram: Set(dto.telegram),
            partner_code: Set(dto.partner_code),
            source: Set(dto.source),
            status: Set(dto.status.unwrap_or(RequestStatus::Pending)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        // Best-effort bonus propagation: the request is the authoritative
        // write, a failure here is logged and never surfaced to the caller.
        if let Some(code) = request.partner_code.clone().filter(|c| !c.is_empty()) {
            if let Err(e) = self.mark_partner_bonus_pending(&code).await {
                log::warn!("Failed to flag bonus for partner code {code}: {e}");
            }
        }

        Ok(RequestResponse::from(request))
    }

    pub async fn find_all(
        &self,
        query: &FindRequestsQuery,
    ) -> AppResult<PaginatedResponse<RequestResponse>> {
        let pagination = Pagination::resolve(
            query.page,
            query.page_size,
            self.pagination.request_page_size,
            self.pagination.max_page_size,
        )?;
        let date_range = DateRange::parse(query.date_from.as_deref(), query.date_to.as_deref())?;

        let mut condition = Condition::all();
        if let Some(status) = &query.status {
            condition = condition.add(requests::Column::Status.eq(status.clone()));
        }
        if let Some(source) = query.source.as_deref() {
            condition = condition.add(contains_ci(requests::Column::Source, source));
        }
        if let Some(search) = query.search.as_deref() {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(requests::Column::FullName, search))
                    .add(contains_ci(requests::Column::Telegram, search)),
            );
        }
        condition = date_range.apply(condition, requests::Column::CreatedAt);

        let page_query = requests::Entity::find()
            .filter(condition.clone())
            .order_by_desc(requests::Column::CreatedAt)
            .limit(pagination.limit())
            .offset(pagination.offset())
            .all(&self.pool);
        let count_query = requests::Entity::find()
            .filter(condition)
            .count(&self.pool);
        let (requests, total) = tokio::try_join!(page_query, count_query)?;

        let items = requests.into_iter().map(RequestResponse::from).collect();
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    pub async fn find_one(&self, id: i32) -> AppResult<RequestResponse> {
        let request = self.find_model(id).await?;
        Ok(RequestResponse::from(request))
    }

    pub async fn find_by_partner_code(&self, partner_code: &str) -> AppResult<Vec<RequestResponse>> {
        let requests = requests::Entity::find()
            .filter(requests::Column::PartnerCode.eq(partner_code))
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(requests.into_iter().map(RequestResponse::from).collect())
    }

    /// Counts of requests grouped by status.
    pub async fn stats_by_status(&self) -> AppResult<HashMap<String, i64>> {
        #[derive(Debug, FromQueryResult)]
        struct StatusCountRow {
            status: RequestStatus,
            count: i64,
        }

        let rows = requests::Entity::find()
            .select_only()
            .column(requests::Column::Status)
            .column_as(Expr::col(requests::Column::Id).count(), "count")
            .group_by(requests::Column::Status)
            .into_model::<StatusCountRow>()
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.status.to_string(), row.count))
            .collect())
    }

    pub async fn update(&self, id: i32, dto: UpdateRequestDto) -> AppResult<RequestResponse> {
        let request = self.find_model(id).await?;

        let mut model = request.into_active_model();
        if let Some(full_name) = dto.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(phone) = dto.phone {
            model.phone = Set(phone);
        }
        if let Some(email) = dto.email {
            model.email = Set(email);
        }
        if let Some(telegram) = dto.telegram {
            model.telegram = Set(Some(telegram));
        }
        if let Some(partner_code) = dto.partner_code {
            model.partner_code = Set(Some(partner_code));
        }
        if let Some(source) = dto.source {
            model.source = Set(source);
        }
        if let Some(status) = dto.status {
            // No transition table is enforced here; any status may be written.
            model.status = Set(status);
        }
        model.updated_at = Set(Utc::now());
        let request = model.update(&self.pool).await?;

        Ok(RequestResponse::from(request))
    }

    pub async fn remove(&self, id: i32) -> AppResult<RequestResponse> {
        let request = self.find_model(id).await?;
        requests::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(RequestResponse::from(request))
    }

    async fn find_model(&self, id: i32) -> AppResult<requests::Model> {
        requests::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with ID {id} not found")))
    }

    async fn mark_partner_bonus_pending(&self, code: &str) -> AppResult<()> {
        let partner = partners::Entity::find()
            .filter(partners::Column::Code.eq(code))
            .one(&self.pool)
            .await?;

        match partner {
            Some(partner) => {
                let mut model = partner.into_active_model();
                model.bonus_status = Set(PartnerBonusStatus::Pending);
                model.updated_at = Set(Utc::now());
                model.update(&self.pool).await?;
                Ok(())
            }
            None => {
                log::warn!("No partner with code {code}; bonus status left untouched");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RequisiteType;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn request_model(id: i32, partner_code: Option<&str>) -> requests::Model {
        requests::Model {
            id,
            full_name: "Ivan Ivanov".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            email: "ivan@example.com".to_string(),
            telegram: Some("@ivan".to_string()),
            partner_code: partner_code.map(str::to_string),
            source: "Website".to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn partner_model(code: &str, bonus_status: PartnerBonusStatus) -> partners::Model {
        partners::Model {
            id: 1,
            name: "Acme Trading".to_string(),
            username: "acme".to_string(),
            requisites: "4111111111111111".to_string(),
            requisite_type: RequisiteType::Card,
            bonus_status,
            code: code.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_dto(partner_code: Option<&str>) -> CreateRequestDto {
        CreateRequestDto {
            full_name: "Ivan Ivanov".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            email: "ivan@example.com".to_string(),
            telegram: Some("@ivan".to_string()),
            partner_code: partner_code.map(str::to_string),
            source: "Website".to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_flags_partner_bonus() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request_model(1, Some("P1"))]])
            .append_query_results([vec![partner_model("P1", PartnerBonusStatus::Completed)]])
            .append_query_results([vec![partner_model("P1", PartnerBonusStatus::Pending)]])
            .into_connection();
        let service = RequestService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(Some("P1"))).await.unwrap();
        assert_eq!(response.partner_code.as_deref(), Some("P1"));
        // Insert, partner lookup, partner update.
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 3);
    }

    #[tokio::test]
    async fn test_create_succeeds_when_partner_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request_model(1, Some("GHOST"))]])
            .append_query_results([Vec::<partners::Model>::new()])
            .into_connection();
        let service = RequestService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(Some("GHOST"))).await.unwrap();
        assert_eq!(response.id, 1);
    }

    #[tokio::test]
    async fn test_create_without_partner_code_skips_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request_model(1, None)]])
            .into_connection();
        let service = RequestService::new(db, PaginationConfig::default());

        let response = service.create(create_dto(None)).await.unwrap();
        assert_eq!(response.partner_code, None);
        let log = service.pool.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<requests::Model>::new()])
            .into_connection();
        let service = RequestService::new(db, PaginationConfig::default());

        let err = service.find_one(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
