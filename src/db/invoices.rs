use crate::errors::{AppError, AppResult};
use crate::models::invoice::{Invoice, InvoiceStatus, LineItem};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

/// Optional filters applied by `invoice list`. Bounds act on the issue date.
#[derive(Debug, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<i64>,
    pub bounds: Option<(NaiveDate, NaiveDate)>,
}

fn parse_date_col(row: &Row, col: &str) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.clone())),
        )
    })
}

pub fn map_row(row: &Row) -> Result<Invoice> {
    let status_str: String = row.get("status")?;
    let status = InvoiceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Invoice {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        client_id: row.get("client_id")?,
        number: row.get("number")?,
        issue_date: parse_date_col(row, "issue_date")?,
        due_date: parse_date_col(row, "due_date")?,
        status,
        created_at: row.get("created_at")?,
    })
}

fn map_item(row: &Row) -> Result<LineItem> {
    Ok(LineItem {
        id: row.get("id")?,
        invoice_id: row.get("invoice_id")?,
        position: row.get("position")?,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        unit_price: row.get("unit_price")?,
    })
}

pub fn insert_invoice(conn: &Connection, inv: &Invoice) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO invoices
             (user_id, client_id, number, issue_date, due_date, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            inv.user_id,
            inv.client_id,
            inv.number,
            inv.issue_date.format("%Y-%m-%d").to_string(),
            inv.due_date.format("%Y-%m-%d").to_string(),
            inv.status.to_db_str(),
            inv.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_item(
    conn: &Connection,
    invoice_id: i64,
    description: &str,
    quantity: f64,
    unit_price: f64,
) -> AppResult<()> {
    let position = next_position(conn, invoice_id)?;
    conn.execute(
        "INSERT INTO invoice_items (invoice_id, position, description, quantity, unit_price)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![invoice_id, position, description, quantity, unit_price],
    )?;
    Ok(())
}

fn next_position(conn: &Connection, invoice_id: i64) -> AppResult<i64> {
    let max: Option<i64> = conn.query_row(
        "SELECT MAX(position) FROM invoice_items WHERE invoice_id = ?1",
        [invoice_id],
        |row| row.get(0),
    )?;
    Ok(max.unwrap_or(0) + 1)
}

/// Remove one line item and close the position gap.
pub fn remove_item(conn: &Connection, invoice_id: i64, position: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM invoice_items WHERE invoice_id = ?1 AND position = ?2",
        params![invoice_id, position],
    )?;
    if n > 0 {
        conn.execute(
            "UPDATE invoice_items SET position = position - 1
             WHERE invoice_id = ?1 AND position > ?2",
            params![invoice_id, position],
        )?;
    }
    Ok(n)
}

pub fn load_items(conn: &Connection, invoice_id: i64) -> AppResult<Vec<LineItem>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM invoice_items WHERE invoice_id = ?1 ORDER BY position ASC",
    )?;
    let rows = stmt.query_map([invoice_id], map_item)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_invoice(conn: &Connection, user_id: &str, id: i64) -> AppResult<Option<Invoice>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM invoices WHERE id = ?1 AND user_id = ?2")?;
    let invoice = stmt.query_row(params![id, user_id], map_row).optional()?;
    Ok(invoice)
}

pub fn set_status(
    conn: &Connection,
    user_id: &str,
    id: i64,
    status: InvoiceStatus,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE invoices SET status = ?1 WHERE id = ?2 AND user_id = ?3",
        params![status.to_db_str(), id, user_id],
    )?;
    Ok(n)
}

/// Delete an invoice together with its line items.
pub fn delete_invoice(conn: &Connection, user_id: &str, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM invoice_items WHERE invoice_id = ?1", [id])?;
    let n = conn.execute(
        "DELETE FROM invoices WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(n)
}

/// Load invoices with optional filters, newest issue date first.
pub fn load_invoices(
    conn: &Connection,
    user_id: &str,
    filter: &InvoiceFilter,
) -> AppResult<Vec<Invoice>> {
    let mut sql = "SELECT * FROM invoices WHERE user_id = ?".to_string();
    let mut values: Vec<Value> = vec![Value::from(user_id.to_string())];

    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        values.push(Value::from(status.to_db_str().to_string()));
    }
    if let Some(client_id) = filter.client_id {
        sql.push_str(" AND client_id = ?");
        values.push(Value::from(client_id));
    }
    if let Some((start, end)) = filter.bounds {
        sql.push_str(" AND issue_date >= ? AND issue_date <= ?");
        values.push(Value::from(start.format("%Y-%m-%d").to_string()));
        values.push(Value::from(end.format("%Y-%m-%d").to_string()));
    }

    sql.push_str(" ORDER BY issue_date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Highest sequence already used for `<prefix>-<year>-NNN` numbers.
/// The sequence restarts every year.
pub fn max_seq_for_year(
    conn: &Connection,
    user_id: &str,
    prefix: &str,
    year: i32,
) -> AppResult<i64> {
    let pattern = format!("{prefix}-{year}-%");
    let mut stmt = conn.prepare_cached(
        "SELECT number FROM invoices WHERE user_id = ?1 AND number LIKE ?2",
    )?;
    let rows = stmt.query_map(params![user_id, pattern], |row| row.get::<_, String>(0))?;

    let mut max = 0i64;
    for r in rows {
        let number = r?;
        if let Some(seq) = number.rsplit('-').next().and_then(|s| s.parse::<i64>().ok()) {
            max = max.max(seq);
        }
    }
    Ok(max)
}
