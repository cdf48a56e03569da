//! Pagination types shared by every list endpoint.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use utoipa::ToSchema;

/// A validated page request. `page` and `page_size` are always >= 1; the
/// per-resource default page size comes from `PaginationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    pub fn resolve(
        page: Option<u64>,
        page_size: Option<u64>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(default_page_size);

        if page < 1 {
            return Err(AppError::ValidationError("page must be >= 1".to_string()));
        }
        if page_size < 1 {
            return Err(AppError::ValidationError(
                "pageSize must be >= 1".to_string(),
            ));
        }
        if page_size > max_page_size {
            return Err(AppError::ValidationError(format!(
                "pageSize must be <= {max_page_size}"
            )));
        }

        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> u64 {
        // page is client-controlled and only bounded below; saturate instead
        // of overflowing for absurd page numbers.
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + pagination.page_size - 1) / pagination.page_size
        };

        Self {
            data,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let p = Pagination::resolve(None, None, 10, 100).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn test_resolve_offset() {
        let p = Pagination::resolve(Some(3), Some(15), 10, 100).unwrap();
        assert_eq!(p.offset(), 30);
        assert_eq!(p.limit(), 15);
    }

    #[test]
    fn test_resolve_rejects_zero_page() {
        let err = Pagination::resolve(Some(0), None, 10, 100).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_resolve_rejects_zero_page_size() {
        let err = Pagination::resolve(None, Some(0), 10, 100).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_resolve_rejects_oversized_page_size() {
        let err = Pagination::resolve(None, Some(500), 10, 100).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        let p = Pagination::resolve(Some(u64::MAX), Some(100), 10, 100).unwrap();
        assert_eq!(p.offset(), u64::MAX);
    }

    #[test]
    fn test_total_pages_ceiling() {
        let p = Pagination::resolve(Some(2), Some(10), 10, 100).unwrap();
        let resp = PaginatedResponse::new(vec![1, 2, 3], p, 25);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.page, 2);
        assert_eq!(resp.page_size, 10);
    }

    #[test]
    fn test_total_pages_zero_when_empty() {
        let p = Pagination::resolve(None, None, 10, 100).unwrap();
        let resp: PaginatedResponse<i32> = PaginatedResponse::new(vec![], p, 0);
        assert_eq!(resp.total_pages, 0);
    }
}
