//! # Listing Query
//!
//! Parses loosely typed listing parameters and describes the resulting page.
//! Bad input never fails: garbage falls back to the defaults and out-of-range
//! pages are clamped by the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::submission::Submission;

/// Page number used when none (or garbage) is supplied
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when none (or garbage) is supplied
pub const DEFAULT_LIMIT: usize = 5;

/// The only sort key
pub const SORT_FIELD: &str = "createdAt";

/// Direction of the `createdAt` ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parse: anything other than `asc`/`desc` means the default.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => SortOrder::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Requested page, 1-based; may exceed the page count
    pub page: usize,
    /// Page size, always positive
    pub limit: usize,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_order: SortOrder::default(),
        }
    }
}

impl ListQuery {
    /// Builds a query; zero page or limit fall back to the defaults.
    pub fn new(page: usize, limit: usize, sort_order: SortOrder) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
            sort_order,
        }
    }

    /// Parses `page`, `limit` and `sortOrder` from raw query parameters.
    ///
    /// Missing, non-numeric or non-positive values use the defaults. Unknown
    /// keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let page = params.get("page").and_then(|v| parse_positive(v));
        let limit = params.get("limit").and_then(|v| parse_positive(v));
        let sort_order = params
            .get("sortOrder")
            .map(|v| SortOrder::parse_or_default(v))
            .unwrap_or_default();

        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
            sort_order,
        )
    }

    /// Number of pages for `total_items`; never less than one.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.limit).max(1)
    }

    /// The requested page clamped into `[1, total_pages]`.
    pub fn safe_page(&self, total_pages: usize) -> usize {
        self.page.clamp(1, total_pages.max(1))
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Pagination metadata of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The page actually returned (after clamping)
    pub page: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Echo of the applied ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInfo {
    pub sort_by: &'static str,
    pub sort_order: SortOrder,
}

impl From<SortOrder> for SortInfo {
    fn from(sort_order: SortOrder) -> Self {
        Self {
            sort_by: SORT_FIELD,
            sort_order,
        }
    }
}

/// One page of submissions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPage {
    pub data: Vec<Submission>,
    pub pagination: Pagination,
    pub sort: SortInfo,
}
