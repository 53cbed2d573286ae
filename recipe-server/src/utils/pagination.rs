//! Page/limit pagination
//!
//! List endpoints take `page` (1-based) and `limit`, and answer with a
//! [`Page`] whose `next`/`previous` links are absolute URLs that keep every
//! other query parameter of the request.

use super::AppError;
use super::query::{self, QueryPairs};
use shared::Page;
use url::Url;

/// Upper bound for `limit`
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parsed pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    pub fn from_query(pairs: &QueryPairs, default_limit: u32) -> Result<Self, AppError> {
        let page = match query::get(pairs, "page") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| AppError::not_found("Page").with_detail("page", raw))?,
            None => 1,
        };
        let limit = match query::get(pairs, "limit") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|l| *l >= 1)
                .ok_or_else(|| {
                    AppError::validation("limit must be a positive integer")
                        .with_field_error("limit", "A positive integer is required")
                })?,
            None => default_limit,
        };
        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Wrap one page of results
    ///
    /// `base` is `public_url + request path`; `pairs` is the original query.
    pub fn into_page<T>(
        self,
        count: i64,
        results: Vec<T>,
        base: &str,
        pairs: &QueryPairs,
    ) -> Page<T> {
        let shown = self.offset() + results.len() as i64;
        let next = (shown < count).then(|| page_url(base, pairs, self.page + 1));
        let previous = (self.page > 1).then(|| page_url(base, pairs, self.page - 1));
        Page {
            count,
            next: next.flatten(),
            previous: previous.flatten(),
            results,
        }
    }
}

fn page_url(base: &str, pairs: &QueryPairs, page: u32) -> Option<String> {
    let mut url = Url::parse(base).ok()?;
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (k, v) in pairs.iter().filter(|(k, _)| k != "page") {
            query.append_pair(k, v);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Some(url.into())
}
