use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("skip must not be negative, got {0}")]
    NegativeSkip(i64),

    #[error("limit must be at least 1, got {0}")]
    NonPositiveLimit(i64),
}

/// Offset window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: i64,
    limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 1000;

    /// Build a page from optional query values. Limits above `MAX_LIMIT` are
    /// clamped rather than rejected.
    ///
    /// # Errors
    /// * `NegativeSkip` - `skip` is below zero
    /// * `NonPositiveLimit` - `limit` is zero or negative
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, PageError> {
        let skip = skip.unwrap_or(0);
        if skip < 0 {
            return Err(PageError::NegativeSkip(skip));
        }

        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if limit < 1 {
            return Err(PageError::NonPositiveLimit(limit));
        }

        Ok(Self {
            skip,
            limit: limit.min(Self::MAX_LIMIT),
        })
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
