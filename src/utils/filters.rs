//! Filter composition shared by every list endpoint: ISO-8601 date ranges
//! and case-insensitive substring matches.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

/// Case-insensitive "contains" on a single column.
pub fn contains_ci<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    Expr::col(col).ilike(format!("%{term}%"))
}

/// An optional `[from, to]` range over one timestamp column. Both bounds are
/// inclusive; a missing bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Parses the `dateFrom`/`dateTo` query parameters. Malformed dates are a
    /// validation error at this boundary, never a silently-dropped filter.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            from: from.map(parse_iso_datetime).transpose()?,
            to: to.map(parse_iso_datetime).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Adds `col >= from` / `col <= to` clauses to the condition. An empty
    /// range contributes nothing.
    pub fn apply<C: ColumnTrait>(&self, mut condition: Condition, col: C) -> Condition {
        if let Some(from) = self.from {
            condition = condition.add(col.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(col.lte(to));
        }
        condition
    }
}

fn parse_iso_datetime(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::ValidationError(format!("Invalid ISO-8601 date: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::requests;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn test_parse_both_bounds() {
        let range = DateRange::parse(
            Some("2024-01-01T00:00:00.000Z"),
            Some("2024-12-31T23:59:59.999Z"),
        )
        .unwrap();
        assert!(range.from.is_some());
        assert!(range.to.is_some());
        assert!(!range.is_empty());
    }

    #[test]
    fn test_parse_absent_bounds() {
        let range = DateRange::parse(None, None).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_parse_malformed_date_is_rejected() {
        let err = DateRange::parse(Some("not-a-date"), None).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_apply_builds_inclusive_range() {
        let range = DateRange::parse(
            Some("2024-01-01T00:00:00.000Z"),
            Some("2024-12-31T23:59:59.999Z"),
        )
        .unwrap();
        let condition = range.apply(Condition::all(), requests::Column::CreatedAt);
        let sql = requests::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("\"created_at\" >="));
        assert!(sql.contains("\"created_at\" <="));
    }

    #[test]
    fn test_empty_range_adds_no_clause() {
        // An empty Condition::all() still renders as WHERE TRUE, so assert
        // the timestamp column is never referenced.
        let range = DateRange::default();
        let condition = range.apply(Condition::all(), requests::Column::CreatedAt);
        let sql = requests::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("\"created_at\" >="));
        assert!(!sql.contains("\"created_at\" <="));
    }

    #[test]
    fn test_contains_ci_uses_ilike() {
        let sql = requests::Entity::find()
            .filter(contains_ci(requests::Column::FullName, "ivan"))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("%ivan%"));
    }
}
