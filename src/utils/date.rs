use chrono::{Datelike, Months, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Month key used by grouping and display: "YYYY-MM".
pub fn month_key(d: &NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first.checked_add_months(Months::new(1))?.pred_opt()?)
}

/// Inclusive date bounds for a single period expression.
///
/// - `YYYY`        → whole year
/// - `YYYY-MM`     → whole month
/// - `YYYY-MM-DD`  → single day
pub fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let year: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            Some((first, last_day_of_month(first.year(), first.month())?))
        }
        10 => {
            let d = parse_date(p)?;
            Some((d, d))
        }
        _ => None,
    }
}

/// Inclusive bounds for a period or a `start:end` range of equal precision.
pub fn range_bounds(r: &str) -> Option<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        // Mixed precision ranges ("2025:2025-06") are ambiguous.
        if start.len() != end.len() {
            return None;
        }

        let (s, _) = period_bounds(start)?;
        let (_, e) = period_bounds(end)?;
        if s > e {
            return None;
        }
        Some((s, e))
    } else {
        period_bounds(r.trim())
    }
}
