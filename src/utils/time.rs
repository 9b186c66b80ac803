//! Duration parsing and formatting for logged time.

use crate::errors::{AppError, AppResult};

/// Parse a duration expression into minutes.
///
/// Accepted forms: `90` (minutes), `90m`, `2h`, `1h30m`.
pub fn parse_duration(s: &str) -> AppResult<i64> {
    let raw = s.trim().to_lowercase();
    if raw.is_empty() {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    let minutes = if let Some((h, rest)) = raw.split_once('h') {
        let hours: i64 = h
            .parse()
            .map_err(|_| AppError::InvalidDuration(s.to_string()))?;
        let extra = match rest.trim_end_matches('m') {
            "" => 0,
            m => m
                .parse::<i64>()
                .map_err(|_| AppError::InvalidDuration(s.to_string()))?,
        };
        hours * 60 + extra
    } else {
        raw.trim_end_matches('m')
            .parse::<i64>()
            .map_err(|_| AppError::InvalidDuration(s.to_string()))?
    };

    if minutes <= 0 {
        return Err(AppError::InvalidDuration(s.to_string()));
    }

    Ok(minutes)
}

/// Minutes as fractional hours, rounded to two decimals for billing.
pub fn minutes_to_hours(mins: i64) -> f64 {
    (mins as f64 / 60.0 * 100.0).round() / 100.0
}
