//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default page number for list endpoints
pub const DEFAULT_PAGE: u32 = 1;
/// Default number of items per page
pub const DEFAULT_LIMIT: u32 = 10;
/// Smallest accepted page size
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Calculate the offset for database queries.
    ///
    /// Widened to u64 so the multiply cannot overflow for any pair of
    /// u32 inputs.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Offset as i64 for SQL bind parameters
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    /// Limit as i64 for SQL bind parameters
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
