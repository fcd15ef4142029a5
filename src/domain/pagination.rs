//! Inclusive row ranges and the pages they select.

use crate::error::AppError;

/// An inclusive, zero-based row range `[start, end]`.
///
/// Constructed only through [`RangeSpec::new`], so `0 <= start <= end` always
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    start: i64,
    end: i64,
}

impl RangeSpec {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if either bound is negative or
    /// `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self, AppError> {
        if start < 0 || end < 0 {
            return Err(AppError::bad_request("range values must be non-negative"));
        }
        if start > end {
            return Err(AppError::bad_request(
                "range start must not be greater than range end",
            ));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// Maximum number of rows in the range, saturating at `i64::MAX`.
    pub fn limit(&self) -> i64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }
}

/// A slice of a collection together with the collection size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based position of the first item within the collection.
    pub start: i64,
    /// Number of rows in the whole collection.
    pub total: i64,
}

impl<T> Page<T> {
    /// Zero-based position of the last returned item, or `None` for an empty page.
    pub fn last(&self) -> Option<i64> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.start + self.items.len() as i64 - 1)
        }
    }
}
