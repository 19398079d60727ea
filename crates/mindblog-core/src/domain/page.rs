use super::Post;

/// Pagination request for listing published posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
    /// Largest skip a store accepts (a signed 64-bit count).
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Build a page from optional query values.
    ///
    /// Missing or zero values fall back to the defaults; `limit` is capped at
    /// `MAX_LIMIT`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);
        Self { page, limit }
    }

    /// Number of rows to skip, capped at `MAX_OFFSET`.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(Self::MAX_OFFSET)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of published posts plus the total published count.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::default();
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::new(Some(2), Some(5)).offset(), 5);
        assert_eq!(Page::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn test_huge_page_offset_is_capped() {
        assert_eq!(Page::new(Some(u64::MAX), Some(10)).offset(), Page::MAX_OFFSET);
        assert_eq!(Page::new(Some(u64::MAX), Some(1)).offset(), Page::MAX_OFFSET);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Page::new(Some(0), Some(0)), Page { page: 1, limit: 10 });
        assert_eq!(Page::new(Some(1), Some(5000)).limit, Page::MAX_LIMIT);
    }
}
