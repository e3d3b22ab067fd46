use std::cmp::Ordering;

use crate::{Category, Post, SortField, SortOrder};

const PAGE_SIZE: usize = 10;

/// Client-side filtering and paging over an already loaded set of posts.
///
/// Used by the public listing, which loads the mock feed once and then filters locally.
/// Any filter or ordering change resets the page to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

/// One page of locally filtered posts.
#[derive(Debug, Clone)]
pub struct PostListPage {
    pub items: Vec<Post>,
    pub page: usize,
    /// Number of posts matching the filter, before paging.
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PostFilter {
    pub fn new() -> Self {
        Self {
            category: None,
            search: None,
            sort: SortField::CreatedAt,
            order: SortOrder::Desc,
            page: 0,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self.page = 0;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self.page = 0;
        self
    }

    pub fn with_sort(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self.page = 0;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn next_page(self) -> Self {
        let page = self.page.saturating_add(1);
        self.with_page(page)
    }

    pub fn prev_page(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.with_page(page)
    }

    /// Returns `true` when `post` passes the category and search filters.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = self.category
            && post.category != category
        {
            return false;
        }
        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.body.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Filter, sort and slice `posts` into the current page.
    pub fn apply(&self, posts: &[Post]) -> PostListPage {
        let mut filtered: Vec<&Post> = posts.iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| self.compare(a, b));

        let total = filtered.len();
        let size = self.page_size.max(1);
        let items = filtered
            .into_iter()
            .skip(self.page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        PostListPage {
            items,
            page: self.page,
            total,
            has_prev: self.page > 0,
            has_next: self.page.saturating_add(1).saturating_mul(size) < total,
        }
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ord = match self.sort {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Title => a.title.cmp(&b.title),
        };
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: usize, category: Category, title: &str, body: &str) -> Post {
        Post {
            id: format!("p{id}"),
            user_id: "u1".into(),
            title: title.into(),
            body: body.into(),
            category,
            tags: vec![],
            created_at: format!("2025-01-{:02}T00:00:00Z", id + 1),
        }
    }

    fn feed(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                let category = Category::ALL[i % 3];
                post(i, category, &format!("title {i:02}"), "body")
            })
            .collect()
    }

    #[test]
    fn default_is_newest_first() {
        let page = PostFilter::new().apply(&feed(3));
        let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1", "p0"]);
    }

    #[test]
    fn filters_by_category() {
        let page = PostFilter::new()
            .with_category(Some(Category::Qna))
            .apply(&feed(9));
        assert_eq!(page.total, 3);
        assert!(page.items.iter().all(|p| p.category == Category::Qna));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_body() {
        let posts = vec![
            post(0, Category::Free, "Rust tips", "..."),
            post(1, Category::Free, "other", "learning RUST"),
            post(2, Category::Free, "nothing", "here"),
        ];
        let page = PostFilter::new().with_search("rust").apply(&posts);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn sorts_by_title_ascending() {
        let posts = vec![
            post(0, Category::Free, "b", ""),
            post(1, Category::Free, "c", ""),
            post(2, Category::Free, "a", ""),
        ];
        let page = PostFilter::new()
            .with_sort(SortField::Title, SortOrder::Asc)
            .apply(&posts);
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn pages_of_ten() {
        let posts = feed(25);
        let filter = PostFilter::new();

        let first = filter.apply(&posts);
        assert_eq!(first.items.len(), 10);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = filter.clone().next_page().next_page().apply(&posts);
        assert_eq!(last.items.len(), 5);
        assert!(last.has_prev);
        assert!(!last.has_next);
    }

    #[test]
    fn exact_multiple_has_no_next_page() {
        let page = PostFilter::new().next_page().apply(&feed(20));
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
    }

    #[test]
    fn prev_page_clamps_at_zero() {
        assert_eq!(PostFilter::new().prev_page().page, 0);
    }

    #[test]
    fn filter_change_resets_page() {
        let filter = PostFilter::new().next_page().next_page().with_search("x");
        assert_eq!(filter.page, 0);
    }

    #[test]
    fn huge_page_is_empty_instead_of_overflowing() {
        let page = PostFilter::new().with_page(usize::MAX / 2).apply(&feed(5));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert!(page.has_prev);
        assert!(!page.has_next);

        let last = PostFilter::new().with_page(usize::MAX).next_page();
        assert_eq!(last.page, usize::MAX);
        assert!(last.apply(&[]).items.is_empty());
    }

    #[test]
    fn empty_search_clears_filter() {
        assert!(PostFilter::new().with_search("").search.is_none());
    }
}
