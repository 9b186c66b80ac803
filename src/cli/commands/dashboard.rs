use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use crate::utils::date;
use crate::utils::formatting::{format_minutes, format_money};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let today = date::today();
    let summary = DashboardLogic::build(&mut pool, cfg, today)?;

    header(format!("Dashboard - {}", date::month_key(&today)));

    println!(
        "{}• Active clients:{}   {}",
        CYAN, RESET, summary.active_clients
    );
    println!(
        "{}• Open tasks:{}       {}{}",
        CYAN,
        RESET,
        summary.open_tasks,
        if summary.overdue_tasks > 0 {
            format!("  {RED}({} overdue){RESET}", summary.overdue_tasks)
        } else {
            String::new()
        }
    );
    println!(
        "{}• Time this month:{}  {} ({} billable)",
        CYAN,
        RESET,
        format_minutes(summary.minutes_this_month),
        format_minutes(summary.billable_minutes_this_month)
    );
    println!(
        "{}• Outstanding:{}      {}{}{}{}",
        CYAN,
        RESET,
        YELLOW,
        format_money(summary.outstanding, &cfg.currency),
        RESET,
        if summary.overdue_invoices > 0 {
            format!("  {RED}({} overdue){RESET}", summary.overdue_invoices)
        } else {
            String::new()
        }
    );
    println!(
        "{}• Paid this month:{}  {}{}{}",
        CYAN,
        RESET,
        GREEN,
        format_money(summary.paid_this_month, &cfg.currency),
        RESET
    );

    if !summary.recent.is_empty() {
        println!("\nRecent activity:");
        for row in &summary.recent {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| row.date.clone());
            println!("  {} | {:<10} {}", date, row.operation, row.message);
        }
    }

    println!();
    Ok(())
}
