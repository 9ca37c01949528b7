//! `page`/`limit` query parameters normalized into store offsets.

use crate::config::PaginationConfig;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::convert::Infallible;

/// Raw query string values. Kept as strings so that junk falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Never rejects. An unreadable query string counts as empty.
#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(PageQuery::from_pairs(pairs))
    }
}

/// Offset and row count handed to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub take: i64,
}

impl PageQuery {
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = PageQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Clamp `page` to at least 1 and `limit` to `1..=max_limit`, then compute
    /// `skip = (page - 1) * limit`.
    pub fn resolve(&self, config: &PaginationConfig) -> Page {
        let page = parse_int(self.page.as_deref()).unwrap_or(1).max(1);
        let limit = parse_int(self.limit.as_deref())
            .unwrap_or(i64::from(config.default_limit))
            .clamp(1, i64::from(config.max_limit));
        Page {
            skip: (page - 1).saturating_mul(limit),
            take: limit,
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}
