//! Search and page arithmetic for the resource listings

/// Page sizes offered by the listing views
pub const PAGE_SIZES: [u32; 3] = [5, 10, 20];

/// Page size a listing starts with
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Delay between the last keystroke and the search request, in milliseconds
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// A search term plus the 1-based page being viewed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub q: String,
    pub page: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// First page of results for `q`
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Same search, different page (pages start at 1)
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    /// Same search, different page size; returns to the first page
    #[must_use]
    pub fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            page: 1,
            ..self
        }
    }

    /// New search term; returns to the first page
    #[must_use]
    pub fn with_search(self, q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            page: 1,
            ..self
        }
    }

    /// Number of records before this page
    pub const fn skip(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.limit as u64
    }

    /// Query string pairs for the `/search` endpoints
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), self.q.clone()),
            ("limit".to_string(), self.limit.to_string()),
            ("skip".to_string(), self.skip().to_string()),
        ]
    }

    /// Cache key for this page of `path`
    pub fn cache_key(&self, path: &str) -> String {
        format!("{path}?q={}&limit={}&skip={}", self.q, self.limit, self.skip())
    }

    /// Whether a previous page exists
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists given the server-reported total
    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.page) < total_pages(total, self.limit)
    }

    /// The previous page, or this one when already on the first
    #[must_use]
    pub fn prev(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.with_page(page)
    }

    /// The next page, or this one when already on the last
    #[must_use]
    pub fn next(self, total: u64) -> Self {
        if self.has_next(total) {
            let page = self.page + 1;
            self.with_page(page)
        } else {
            self
        }
    }
}

/// Number of pages needed to show `total` records `limit` at a time
pub const fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_is_zero_based_offset() {
        let query = PageQuery::new("phone");
        assert_eq!(query.skip(), 0);

        let query = query.with_page(3);
        assert_eq!(query.skip(), 20);

        let query = query.with_limit(5).with_page(4);
        assert_eq!(query.skip(), 15);
    }

    #[test]
    fn test_to_query_pairs() {
        let query = PageQuery::new("").with_page(2);
        assert_eq!(
            query.to_query(),
            vec![
                ("q".to_string(), String::new()),
                ("limit".to_string(), "10".to_string()),
                ("skip".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_and_limit_reset_page() {
        let query = PageQuery::new("a").with_page(4);
        assert_eq!(query.clone().with_search("b").page, 1);
        assert_eq!(query.with_limit(20).page, 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(194, 10), 20);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_prev_next_bounds() {
        let query = PageQuery::default();
        assert!(!query.has_prev());
        assert_eq!(query.clone().prev().page, 1);

        let query = query.next(25).next(25);
        assert_eq!(query.page, 3);
        assert!(!query.has_next(25));
        assert_eq!(query.clone().next(25).page, 3);
        assert_eq!(query.prev().page, 2);
    }

    #[test]
    fn test_cache_key_distinguishes_pages() {
        let query = PageQuery::new("phone").with_limit(5);
        assert_eq!(
            query.cache_key("/products/search"),
            "/products/search?q=phone&limit=5&skip=0"
        );
        assert_ne!(
            query.cache_key("/products/search"),
            query.clone().with_page(2).cache_key("/products/search")
        );
        assert_ne!(
            query.cache_key("/products/search"),
            query.cache_key("/users/search")
        );
    }
}
