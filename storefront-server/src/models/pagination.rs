//! Pagination types for product listing

/// Maximum items per page
pub const MAX_LIMIT: u32 = 50;

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 50;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 50)
    pub limit: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Limit is clamped to 1..=50
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.limit as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// One page of rows plus the total row count
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Pagination the page was fetched with
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Calculate total number of pages, ceiling(total / limit).
    ///
    /// An empty table has zero pages.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 0;
        }
        let limit = self.pagination.limit.max(1) as u64;
        ((self.total as u64 + limit - 1) / limit) as u32
    }
}

/// Query parameters for pagination
///
/// Kept as raw strings: an unparseable value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Collect from decoded query pairs. The first `page` and `limit` win;
/// repeats and unknown keys are ignored.
impl FromIterator<(String, String)> for PaginationParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);

        let limit = params
            .limit
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|l| l.clamp(1, MAX_LIMIT as i64) as u32)
            .unwrap_or(DEFAULT_LIMIT);

        Self::new(page, limit)
    }
}
