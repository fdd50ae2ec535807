//! Paginated list responses
//!
//! List endpoints return a bare JSON array for the requested page and report
//! the size of the whole collection in the `X-Total-Count` header.
//! [`paginate`] folds both, plus the page the caller asked for, into a
//! [`PaginatedList`].

use crate::envelope::{failure_envelope, ResultEnvelope};
use crate::error::SdkResult;
use crate::transport::TransportResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the total number of items in the collection
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Page used when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Position of a page within a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub current_page: u32,
    /// Items per page
    pub page_size: u32,
    /// Items in the whole collection
    pub total_items: u64,
}

impl Pagination {
    /// Build pagination metadata, substituting defaults for absent or zero
    /// page and size
    pub fn new(page: Option<u32>, page_size: Option<u32>, total_items: u64) -> Self {
        Self {
            current_page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            page_size: page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE),
            total_items,
        }
    }

    /// Number of pages needed to show every item
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.page_size))
    }

    /// Whether a later page exists
    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages()
    }

    /// Whether an earlier page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of items plus where it sits in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,
    /// Page metadata
    pub pagination: Pagination,
}

/// Page and size requested from a list endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page, `None` for the default
    pub page: Option<u32>,
    /// Requested size, `None` for the default
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Request a specific page and size
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Page number actually sent, after defaults
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)
    }

    /// Page size actually sent, after defaults
    pub fn page_size(&self) -> u32 {
        self.page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Query parameters in the `_page` / `_limit` convention of the API
    pub fn query(&self) -> [(&'static str, u32); 2] {
        [("_page", self.page()), ("_limit", self.page_size())]
    }
}

/// Parse a total-count header value.
///
/// Leading whitespace and a single `+` are skipped and the leading run of
/// ASCII digits is read, so `"42"`, `"+42"` and `"42 items"` all give 42.
/// Values with no leading digit, or too large to fit, give 0.
pub fn parse_total_count(value: Option<&str>) -> u64 {
    let Some(value) = value else {
        return 0;
    };
    let trimmed = value.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    trimmed[..digits_end].parse().unwrap_or(0)
}

/// Normalize a list response into a paginated envelope.
///
/// The failure path matches [`normalize`](crate::envelope::normalize). On
/// success the body must be a JSON array of `T`. A falsy body (empty,
/// `null`, `false`, `0` or `""`) is an empty page.
pub async fn paginate<T, R>(
    response: R,
    request: PageRequest,
) -> SdkResult<ResultEnvelope<PaginatedList<T>>>
where
    T: DeserializeOwned,
    R: TransportResponse,
{
    if !response.is_success() {
        return failure_envelope(response).await;
    }

    let total_items = parse_total_count(response.header(TOTAL_COUNT_HEADER));
    let body = response.json().await?;
    let items: Vec<T> = if is_falsy(&body) {
        Vec::new()
    } else {
        serde_json::from_value(body)?
    };

    Ok(ResultEnvelope::success(PaginatedList {
        items,
        pagination: Pagination::new(request.page, request.page_size, total_items),
    }))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::transport::StaticResponse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_with_total_header() {
        let response =
            StaticResponse::json(200, &json!([1, 2, 3])).with_header("X-Total-Count", "42");

        let envelope: ResultEnvelope<PaginatedList<u32>> =
            paginate(response, PageRequest::default()).await.unwrap();

        let list = envelope.into_data().unwrap();
        assert_eq!(list.items, vec![1, 2, 3]);
        assert_eq!(
            list.pagination,
            Pagination {
                current_page: 1,
                page_size: 10,
                total_items: 42,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_header_gives_zero_total() {
        let response = StaticResponse::json(200, &json!([1, 2, 3]));

        let envelope: ResultEnvelope<PaginatedList<u32>> =
            paginate(response, PageRequest::default()).await.unwrap();

        assert_eq!(envelope.into_data().unwrap().pagination.total_items, 0);
    }

    #[tokio::test]
    async fn test_requested_page_is_echoed() {
        let response =
            StaticResponse::json(200, &json!(["a", "b"])).with_header("x-total-count", "12");

        let envelope: ResultEnvelope<PaginatedList<String>> =
            paginate(response, PageRequest::new(3, 5)).await.unwrap();

        let pagination = envelope.into_data().unwrap().pagination;
        assert_eq!(pagination.current_page, 3);
        assert_eq!(pagination.page_size, 5);
        assert_eq!(pagination.total_items, 12);
    }

    #[tokio::test]
    async fn test_zero_page_and_size_fall_back_to_defaults() {
        let response = StaticResponse::json(200, &json!([]));

        let envelope: ResultEnvelope<PaginatedList<u32>> =
            paginate(response, PageRequest::new(0, 0)).await.unwrap();

        let pagination = envelope.into_data().unwrap().pagination;
        assert_eq!(pagination.current_page, DEFAULT_PAGE);
        assert_eq!(pagination.page_size, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_null_body_is_empty_page() {
        let response = StaticResponse::new(200).with_body("null");

        let envelope: ResultEnvelope<PaginatedList<u32>> =
            paginate(response, PageRequest::default()).await.unwrap();

        assert!(envelope.into_data().unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_falsy_bodies_are_empty_pages() {
        for body in ["", "false", "0", "0.0", "\"\""] {
            let response = StaticResponse::new(200)
                .with_header("X-Total-Count", "3")
                .with_body(body);

            let envelope: ResultEnvelope<PaginatedList<u32>> =
                paginate(response, PageRequest::default()).await.unwrap();

            let list = envelope.into_data().unwrap();
            assert!(list.items.is_empty(), "body {:?}", body);
            assert_eq!(list.pagination.total_items, 3);
        }
    }

    #[tokio::test]
    async fn test_truthy_scalar_body_propagates() {
        let response = StaticResponse::new(200).with_body("true");

        let result: SdkResult<ResultEnvelope<PaginatedList<u32>>> =
            paginate(response, PageRequest::default()).await;

        assert!(matches!(result, Err(SdkError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_failure_status() {
        let response = StaticResponse::new(404)
            .with_status_text("Not Found")
            .with_header("X-Total-Count", "42")
            .with_body("no such collection");

        let envelope: ResultEnvelope<PaginatedList<u32>> =
            paginate(response, PageRequest::default()).await.unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Not Found");
        assert_eq!(envelope.error().unwrap().code, "404");
        assert_eq!(envelope.error().unwrap().details, "no such collection");
        assert!(envelope.data().is_none());
    }

    #[tokio::test]
    async fn test_non_array_body_propagates() {
        let response = StaticResponse::json(200, &json!({"items": []}));

        let result: SdkResult<ResultEnvelope<PaginatedList<u32>>> =
            paginate(response, PageRequest::default()).await;

        assert!(matches!(result, Err(SdkError::SerializationError(_))));
    }

    #[test]
    fn test_parse_total_count() {
        assert_eq!(parse_total_count(Some("42")), 42);
        assert_eq!(parse_total_count(Some("  17 ")), 17);
        assert_eq!(parse_total_count(Some("42abc")), 42);
        assert_eq!(parse_total_count(Some("abc")), 0);
        assert_eq!(parse_total_count(Some("-5")), 0);
        assert_eq!(parse_total_count(Some("+5")), 5);
        assert_eq!(parse_total_count(Some(" +12 rows")), 12);
        assert_eq!(parse_total_count(Some("++5")), 0);
        assert_eq!(parse_total_count(Some("")), 0);
        assert_eq!(parse_total_count(Some("99999999999999999999999")), 0);
        assert_eq!(parse_total_count(None), 0);
    }

    #[test]
    fn test_page_navigation() {
        let first = Pagination::new(Some(1), Some(10), 25);
        assert_eq!(first.total_pages(), 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = Pagination::new(Some(3), Some(10), 25);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let empty = Pagination::new(None, None, 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_page_request_query() {
        assert_eq!(PageRequest::default().query(), [("_page", 1), ("_limit", 10)]);
        assert_eq!(PageRequest::new(4, 25).query(), [("_page", 4), ("_limit", 25)]);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let pagination = Pagination::new(Some(2), Some(20), 55);
        assert_eq!(
            serde_json::to_value(pagination).unwrap(),
            json!({"currentPage": 2, "pageSize": 20, "totalItems": 55})
        );
    }
}
