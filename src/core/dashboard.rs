//! Dashboard aggregation.
//!
//! Rows are loaded per collection and folded in memory; nothing here is
//! pushed down into SQL aggregates.

use crate::config::Config;
use crate::db::log::{ActivityRow, load_activity};
use crate::db::pool::DbPool;
use crate::db::{clients, invoices, tasks, time_entries};
use crate::errors::AppResult;
use crate::models::invoice::{self, InvoiceStatus};
use crate::utils::date;
use chrono::NaiveDate;

#[derive(Debug, Default)]
pub struct DashboardSummary {
    pub active_clients: i64,
    pub open_tasks: i64,
    pub overdue_tasks: i64,
    pub minutes_this_month: i64,
    pub billable_minutes_this_month: i64,
    pub outstanding: f64,
    pub overdue_invoices: i64,
    pub paid_this_month: f64,
    pub recent: Vec<ActivityRow>,
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn build(pool: &mut DbPool, cfg: &Config, today: NaiveDate) -> AppResult<DashboardSummary> {
        let conn = &pool.conn;
        let month = date::month_key(&today);

        let mut summary = DashboardSummary::default();

        summary.active_clients = clients::load_clients(conn, &cfg.user, false)?.len() as i64;

        for task in tasks::load_tasks(conn, &cfg.user, &Default::default())? {
            if task.status.is_open() {
                summary.open_tasks += 1;
            }
            if task.is_overdue(today) {
                summary.overdue_tasks += 1;
            }
        }

        for entry in time_entries::load_entries(conn, &cfg.user, &Default::default())? {
            if date::month_key(&entry.date) == month {
                summary.minutes_this_month += entry.minutes;
                if entry.billable {
                    summary.billable_minutes_this_month += entry.minutes;
                }
            }
        }

        for inv in invoices::load_invoices(conn, &cfg.user, &Default::default())? {
            let total = invoice::total(&invoices::load_items(conn, inv.id)?);
            match inv.status {
                InvoiceStatus::Sent => {
                    summary.outstanding += total;
                    if inv.is_overdue(today) {
                        summary.overdue_invoices += 1;
                    }
                }
                InvoiceStatus::Paid if date::month_key(&inv.issue_date) == month => {
                    summary.paid_this_month += total;
                }
                _ => {}
            }
        }

        summary.recent = load_activity(conn, &cfg.user, Some(5))?;

        Ok(summary)
    }
}
