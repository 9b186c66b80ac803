use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::write_rows;
use crate::ui::messages::warning;
use crate::utils::date;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        by_client,
        monthly,
        period,
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    let bounds = match period.as_deref() {
        None => None,
        Some(p) => {
            Some(date::range_bounds(p).ok_or_else(|| AppError::InvalidDate(p.to_string()))?)
        }
    };

    // Monthly grouping is the default when nothing is selected.
    let use_monthly = *monthly || !*by_client;

    let title_period = period.as_deref().unwrap_or("all time");

    if use_monthly {
        let rows = ReportLogic::monthly(&mut pool, cfg, bounds)?;
        if rows.is_empty() {
            warning("No data for the selected period.");
            return Ok(());
        }

        if let (Some(fmt), Some(f)) = (format, file) {
            let path = expand_tilde(f);
            ensure_writable(&path, *force)?;
            return write_rows(fmt, &path, &format!("Monthly report - {title_period}"), &rows);
        }

        let mut table = Table::new(&["MONTH", "HOURS", "INVOICED", "PAID"]);
        for r in &rows {
            table.add_row(vec![
                r.month.clone(),
                format!("{:.2}", r.hours),
                format!("{:.2}", r.invoiced),
                format!("{:.2}", r.paid),
            ]);
        }
        println!("\nMonthly report - {title_period} ({})\n", cfg.currency);
        print!("{}", table.render());
    } else {
        let rows = ReportLogic::by_client(&mut pool, cfg, bounds)?;
        if rows.is_empty() {
            warning("No data for the selected period.");
            return Ok(());
        }

        if let (Some(fmt), Some(f)) = (format, file) {
            let path = expand_tilde(f);
            ensure_writable(&path, *force)?;
            return write_rows(
                fmt,
                &path,
                &format!("Client report - {title_period}"),
                &rows,
            );
        }

        let mut table = Table::new(&["CLIENT", "HOURS", "BILLABLE", "OPEN TASKS", "INVOICED", "PAID"]);
        for r in &rows {
            table.add_row(vec![
                r.client.clone(),
                format!("{:.2}", r.hours),
                format!("{:.2}", r.billable_hours),
                r.open_tasks.to_string(),
                format!("{:.2}", r.invoiced),
                format!("{:.2}", r.paid),
            ]);
        }
        println!("\nClient report - {title_period} ({})\n", cfg.currency);
        print!("{}", table.render());
    }

    Ok(())
}
