use crate::errors::{AppError, AppResult};
use crate::utils::date::range_bounds;
use chrono::NaiveDate;

/// Parse --range into inclusive date bounds.
///
/// Supported:
/// - `YYYY`
/// - `YYYY-MM`
/// - `YYYY-MM-DD`
/// - `start:end` with both sides of the same precision
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    range_bounds(r).ok_or_else(|| AppError::InvalidDate(r.to_string()))
}
