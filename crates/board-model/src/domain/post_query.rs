use serde::{Deserialize, Serialize};

use crate::{Category, Post};

const DEFAULT_LIMIT: u32 = 10;

/// Field posts are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query parameters of `GET /posts` (cursor-paginated, server-side filtering).
///
/// Serialized directly into the query string; unset fields are omitted.
/// Changing any filter or the ordering drops both cursors, so the next request starts from the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// One page of `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub items: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PostQuery {
    /// First page, newest first, ten per page.
    pub fn new() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            prev_cursor: None,
            next_cursor: None,
            sort: Some(SortField::CreatedAt),
            order: Some(SortOrder::Desc),
            category: None,
            from: None,
            to: None,
            search: None,
        }
    }

    /// Page size sent as-is; the backend enforces its own bounds.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = Some(sort);
        self.order = Some(order);
        self.reset_cursors()
    }

    /// `None` clears the category filter.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self.reset_cursors()
    }

    /// Blank input clears the search filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self.reset_cursors()
    }

    pub fn with_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from = from;
        self.to = to;
        self.reset_cursors()
    }

    /// Query for the page after `page`, or `None` when it is the last one.
    pub fn next_page(&self, page: &PostPage) -> Option<Self> {
        let cursor = page.next_cursor.clone()?;
        let mut next = self.clone();
        next.next_cursor = Some(cursor);
        next.prev_cursor = None;
        Some(next)
    }

    /// Query for the page before `page`, or `None` when it is the first one.
    pub fn prev_page(&self, page: &PostPage) -> Option<Self> {
        let cursor = page.prev_cursor.clone()?;
        let mut prev = self.clone();
        prev.prev_cursor = Some(cursor);
        prev.next_cursor = None;
        Some(prev)
    }

    fn reset_cursors(mut self) -> Self {
        self.prev_cursor = None;
        self.next_cursor = None;
        self
    }
}
