use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Clone, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, count: u64, pagination: Pagination) -> Paginated<T> {
        Self {
            items,
            count,
            total_pages: pagination.total_pages(count),
        }
    }
}

#[derive(Deserialize, Default)]
struct RawPagination {
    page: Option<String>,
    limit: Option<String>,
}

/// Page selection shared by the list endpoints.
///
/// Values that are missing, non-numeric or not strictly positive fall back to
/// the defaults instead of rejecting the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 5;

    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, Self::DEFAULT_PAGE),
            limit: positive_or(limit, Self::DEFAULT_LIMIT),
        }
    }

    /// Number of leading records to omit.
    pub fn skip(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }

    /// [`Self::skip`] as an SQL `OFFSET`, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip()).unwrap_or(i64::MAX)
    }

    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(u64::from(self.limit))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<RawPagination>>().await {
            Ok(Query(raw)) => Ok(Pagination::parse(
                raw.page.as_deref(),
                raw.limit.as_deref(),
            )),
            Err(err) => {
                tracing::debug!("Rejected pagination options: {}", err);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid pagination options"})),
                )
                    .into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        assert_eq!(Pagination::parse(None, None), Pagination::new(1, 5));
    }

    #[test]
    fn falls_back_on_garbage_and_non_positive_values() {
        assert_eq!(Pagination::parse(Some("abc"), Some("0")), Pagination::new(1, 5));
        assert_eq!(Pagination::parse(Some("-2"), Some("")), Pagination::new(1, 5));
        assert_eq!(Pagination::parse(Some(" 3 "), Some("10")), Pagination::new(3, 10));
    }

    #[test]
    fn computes_skip() {
        assert_eq!(Pagination::new(1, 5).skip(), 0);
        assert_eq!(Pagination::new(2, 5).skip(), 5);
        assert_eq!(Pagination::new(4, 25).skip(), 75);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let pagination = Pagination::parse(Some("4294967295"), Some("4294967295"));
        assert_eq!(pagination, Pagination::new(u32::MAX, u32::MAX));
        assert_eq!(pagination.skip(), (u64::from(u32::MAX) - 1) * u64::from(u32::MAX));
        assert_eq!(pagination.offset(), i64::MAX);

        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn rounds_total_pages_up() {
        let pagination = Pagination::new(2, 5);
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(5), 1);
        assert_eq!(pagination.total_pages(12), 3);
    }
}
