//! Flat row shapes for export.
//!
//! Every exportable collection is reduced to a flat struct with string
//! and scalar fields only; client references are resolved to display
//! names here (with the "Unknown Client" fallback) so all writers stay
//! dumb.

use crate::core::report::{ClientRow, MonthRow};
use crate::db::clients::resolve_name;
use crate::models::client::Client;
use crate::models::invoice::Invoice;
use crate::models::task::Task;
use crate::models::time_entry::TimeEntry;
use serde::Serialize;
use std::collections::HashMap;

/// A row that can be written by the table-shaped writers (XLSX, PDF).
/// CSV and JSON go through serde instead.
pub trait Exportable: Serialize {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

fn fmt2(v: f64) -> String {
    format!("{:.2}", v)
}

// ---------------------------
// Clients
// ---------------------------
#[derive(Serialize, Clone, Debug)]
pub struct ClientExport {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub archived: bool,
    pub created_at: String,
}

impl ClientExport {
    pub fn from_client(c: &Client) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            company: c.company.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            archived: c.archived,
            created_at: c.created_at.clone(),
        }
    }
}

impl Exportable for ClientExport {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "company", "email", "phone", "archived", "created_at"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.company.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.archived.to_string(),
            self.created_at.clone(),
        ]
    }
}

// ---------------------------
// Tasks
// ---------------------------
#[derive(Serialize, Clone, Debug)]
pub struct TaskExport {
    pub id: i64,
    pub title: String,
    pub client: String,
    pub status: String,
    pub priority: String,
    pub due_date: String,
    pub created_at: String,
}

impl TaskExport {
    pub fn from_task(t: &Task, names: &HashMap<i64, String>) -> Self {
        Self {
            id: t.id,
            title: t.title.clone(),
            client: resolve_name(names, t.client_id),
            status: t.status.to_db_str().to_string(),
            priority: t.priority.to_db_str().to_string(),
            due_date: t.due_str(),
            created_at: t.created_at.clone(),
        }
    }
}

impl Exportable for TaskExport {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "client", "status", "priority", "due_date", "created_at"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.client.clone(),
            self.status.clone(),
            self.priority.clone(),
            self.due_date.clone(),
            self.created_at.clone(),
        ]
    }
}

// ---------------------------
// Time entries
// ---------------------------
#[derive(Serialize, Clone, Debug)]
pub struct TimeExport {
    pub id: i64,
    pub date: String,
    pub client: String,
    pub task_id: Option<i64>,
    pub minutes: i64,
    pub billable: bool,
    pub billed: bool,
    pub note: String,
}

impl TimeExport {
    pub fn from_entry(e: &TimeEntry, names: &HashMap<i64, String>) -> Self {
        Self {
            id: e.id,
            date: e.date_str(),
            client: resolve_name(names, e.client_id),
            task_id: e.task_id,
            minutes: e.minutes,
            billable: e.billable,
            billed: e.billed,
            note: e.note.clone(),
        }
    }
}

impl Exportable for TimeExport {
    fn headers() -> &'static [&'static str] {
        &["id", "date", "client", "task_id", "minutes", "billable", "billed", "note"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.client.clone(),
            self.task_id.map(|t| t.to_string()).unwrap_or_default(),
            self.minutes.to_string(),
            self.billable.to_string(),
            self.billed.to_string(),
            self.note.clone(),
        ]
    }
}

// ---------------------------
// Invoices
// ---------------------------
#[derive(Serialize, Clone, Debug)]
pub struct InvoiceExport {
    pub id: i64,
    pub number: String,
    pub client: String,
    pub issue_date: String,
    pub due_date: String,
    pub status: String,
    pub total: f64,
}

impl InvoiceExport {
    pub fn from_invoice(inv: &Invoice, total: f64, names: &HashMap<i64, String>) -> Self {
        Self {
            id: inv.id,
            number: inv.number.clone(),
            client: resolve_name(names, Some(inv.client_id)),
            issue_date: inv.issue_date.format("%Y-%m-%d").to_string(),
            due_date: inv.due_date.format("%Y-%m-%d").to_string(),
            status: inv.status.to_db_str().to_string(),
            total,
        }
    }
}

impl Exportable for InvoiceExport {
    fn headers() -> &'static [&'static str] {
        &["id", "number", "client", "issue_date", "due_date", "status", "total"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.number.clone(),
            self.client.clone(),
            self.issue_date.clone(),
            self.due_date.clone(),
            self.status.clone(),
            fmt2(self.total),
        ]
    }
}

// ---------------------------
// Report rows
// ---------------------------
impl Exportable for ClientRow {
    fn headers() -> &'static [&'static str] {
        &["client", "hours", "billable_hours", "open_tasks", "invoiced", "paid"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.client.clone(),
            fmt2(self.hours),
            fmt2(self.billable_hours),
            self.open_tasks.to_string(),
            fmt2(self.invoiced),
            fmt2(self.paid),
        ]
    }
}

impl Exportable for MonthRow {
    fn headers() -> &'static [&'static str] {
        &["month", "hours", "invoiced", "paid"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            fmt2(self.hours),
            fmt2(self.invoiced),
            fmt2(self.paid),
        ]
    }
}
