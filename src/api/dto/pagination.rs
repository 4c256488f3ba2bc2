//! Pagination query parameters and the page response envelope.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::pagination::{Page, PageRequest, Sort};

/// Query parameters for `GET /medicos`.
///
/// Values that fail to parse are treated as absent, so a malformed
/// `?page=abc` falls back to the default instead of rejecting the request.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub size: Option<i64>,

    #[serde(default)]
    pub sort: Option<String>,
}

impl PaginationParams {
    /// Converts raw parameters into a [`PageRequest`].
    ///
    /// # Defaults
    ///
    /// - `page`: 0 (negative values clamp to 0)
    /// - `size`: 10 (values below 1 use the default, values above 2000 clamp to 2000)
    /// - `sort`: `nome,asc`
    pub fn to_page_request(&self) -> PageRequest {
        let page = self
            .page
            .filter(|p| *p >= 0)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(0);

        let size = match self.size {
            Some(s) if s >= 1 => s.min(i64::from(PageRequest::MAX_SIZE)) as u32,
            _ => PageRequest::DEFAULT_SIZE,
        };

        let sort = self
            .sort
            .as_deref()
            .map(Sort::parse_lenient)
            .unwrap_or_default();

        PageRequest::new(page, size, sort)
    }
}

/// Page envelope returned by listing endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: u32,
    /// Zero-based index of this page.
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();

        PageResponse {
            number_of_elements: page.content.len(),
            empty: page.content.is_empty(),
            content: page.content,
            total_elements: page.total_elements,
            total_pages,
            number: page.request.page,
            size: page.request.size,
            first,
            last,
        }
    }
}
