//! Report aggregation: group loaded rows by client or by month.
//!
//! The grouping functions are pure so they can be fed straight from
//! fixtures; the `ReportLogic` wrapper does the loading.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{clients, invoices, tasks, time_entries};
use crate::errors::AppResult;
use crate::models::client::UNKNOWN_CLIENT;
use crate::models::invoice::{self, Invoice, InvoiceStatus};
use crate::models::task::Task;
use crate::models::time_entry::TimeEntry;
use crate::utils::date;
use crate::utils::time::minutes_to_hours;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Serialize)]
pub struct ClientRow {
    pub client: String,
    pub hours: f64,
    pub billable_hours: f64,
    pub open_tasks: i64,
    pub invoiced: f64,
    pub paid: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    pub month: String,
    pub hours: f64,
    pub invoiced: f64,
    pub paid: f64,
}

fn client_key(names: &HashMap<i64, String>, client_id: Option<i64>) -> String {
    match client_id {
        None => UNKNOWN_CLIENT.to_string(),
        Some(id) => names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
    }
}

/// Per-client figures, ordered by client name. Dangling references all
/// collapse into the "Unknown Client" row.
pub fn by_client(
    names: &HashMap<i64, String>,
    tasks: &[Task],
    entries: &[TimeEntry],
    invoices: &[(Invoice, f64)],
) -> Vec<ClientRow> {
    let mut rows: BTreeMap<String, ClientRow> = BTreeMap::new();

    let entry_for = |rows: &mut BTreeMap<String, ClientRow>, key: String| {
        rows.entry(key.clone()).or_insert_with(|| ClientRow {
            client: key,
            hours: 0.0,
            billable_hours: 0.0,
            open_tasks: 0,
            invoiced: 0.0,
            paid: 0.0,
        });
    };

    for task in tasks {
        let key = client_key(names, task.client_id);
        entry_for(&mut rows, key.clone());
        if task.status.is_open()
            && let Some(r) = rows.get_mut(&key)
        {
            r.open_tasks += 1;
        }
    }

    for entry in entries {
        let key = client_key(names, entry.client_id);
        entry_for(&mut rows, key.clone());
        if let Some(r) = rows.get_mut(&key) {
            r.hours += minutes_to_hours(entry.minutes);
            if entry.billable {
                r.billable_hours += minutes_to_hours(entry.minutes);
            }
        }
    }

    for (inv, total) in invoices {
        let key = client_key(names, Some(inv.client_id));
        entry_for(&mut rows, key.clone());
        if let Some(r) = rows.get_mut(&key) {
            match inv.status {
                InvoiceStatus::Paid => r.paid += total,
                _ => r.invoiced += total,
            }
        }
    }

    rows.into_values().collect()
}

/// Per-month figures keyed on "YYYY-MM" (time entry date, invoice issue
/// date), in chronological order.
pub fn monthly(entries: &[TimeEntry], invoices: &[(Invoice, f64)]) -> Vec<MonthRow> {
    let mut rows: BTreeMap<String, MonthRow> = BTreeMap::new();

    let entry_for = |rows: &mut BTreeMap<String, MonthRow>, key: String| {
        rows.entry(key.clone()).or_insert_with(|| MonthRow {
            month: key,
            hours: 0.0,
            invoiced: 0.0,
            paid: 0.0,
        });
    };

    for entry in entries {
        let key = date::month_key(&entry.date);
        entry_for(&mut rows, key.clone());
        if let Some(r) = rows.get_mut(&key) {
            r.hours += minutes_to_hours(entry.minutes);
        }
    }

    for (inv, total) in invoices {
        let key = date::month_key(&inv.issue_date);
        entry_for(&mut rows, key.clone());
        if let Some(r) = rows.get_mut(&key) {
            match inv.status {
                InvoiceStatus::Paid => r.paid += total,
                _ => r.invoiced += total,
            }
        }
    }

    rows.into_values().collect()
}

pub struct ReportLogic;

impl ReportLogic {
    /// Load the user's rows, optionally restricted to a period, with
    /// invoice totals resolved from line items.
    #[allow(clippy::type_complexity)]
    fn load(
        pool: &mut DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<(
        HashMap<i64, String>,
        Vec<Task>,
        Vec<TimeEntry>,
        Vec<(Invoice, f64)>,
    )> {
        let conn = &pool.conn;

        let names = clients::client_names(conn, &cfg.user)?;

        let task_filter = tasks::TaskFilter {
            due_bounds: bounds,
            ..Default::default()
        };
        let task_rows = tasks::load_tasks(conn, &cfg.user, &task_filter)?;

        let time_filter = time_entries::TimeFilter {
            bounds,
            ..Default::default()
        };
        let entry_rows = time_entries::load_entries(conn, &cfg.user, &time_filter)?;

        let invoice_filter = invoices::InvoiceFilter {
            bounds,
            ..Default::default()
        };
        let mut invoice_rows = Vec::new();
        for inv in invoices::load_invoices(conn, &cfg.user, &invoice_filter)? {
            let total = invoice::total(&invoices::load_items(conn, inv.id)?);
            invoice_rows.push((inv, total));
        }

        Ok((names, task_rows, entry_rows, invoice_rows))
    }

    pub fn by_client(
        pool: &mut DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<ClientRow>> {
        let (names, task_rows, entry_rows, invoice_rows) = Self::load(pool, cfg, bounds)?;
        Ok(by_client(&names, &task_rows, &entry_rows, &invoice_rows))
    }

    pub fn monthly(
        pool: &mut DbPool,
        cfg: &Config,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<MonthRow>> {
        let (_, _, entry_rows, invoice_rows) = Self::load(pool, cfg, bounds)?;
        Ok(monthly(&entry_rows, &invoice_rows))
    }
}
