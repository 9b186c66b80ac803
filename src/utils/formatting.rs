//! Formatting utilities used for CLI and export outputs.

/// Minutes as "07h 30m".
pub fn format_minutes(mins: i64) -> String {
    let m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

/// Money with two decimals and the configured currency code.
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Truncate long free text for table cells.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
