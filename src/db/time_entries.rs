use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

/// Optional filters applied by `time list`.
#[derive(Debug, Default)]
pub struct TimeFilter {
    pub client_id: Option<i64>,
    pub task_id: Option<i64>,
    pub bounds: Option<(NaiveDate, NaiveDate)>,
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        client_id: row.get("client_id")?,
        task_id: row.get("task_id")?,
        date,
        minutes: row.get("minutes")?,
        billable: row.get::<_, i64>("billable")? != 0,
        billed: row.get::<_, i64>("billed")? != 0,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries
             (user_id, client_id, task_id, date, minutes, billable, billed, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            e.user_id,
            e.client_id,
            e.task_id,
            e.date.format("%Y-%m-%d").to_string(),
            e.minutes,
            e.billable as i64,
            e.billed as i64,
            e.note,
            e.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_entry(conn: &Connection, user_id: &str, id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM time_entries WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(n)
}

pub fn get_entry(conn: &Connection, user_id: &str, id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM time_entries WHERE id = ?1 AND user_id = ?2")?;
    let entry = stmt.query_row(params![id, user_id], map_row).optional()?;
    Ok(entry)
}

/// Load entries with optional filters, oldest first.
pub fn load_entries(
    conn: &Connection,
    user_id: &str,
    filter: &TimeFilter,
) -> AppResult<Vec<TimeEntry>> {
    let mut sql = "SELECT * FROM time_entries WHERE user_id = ?".to_string();
    let mut values: Vec<Value> = vec![Value::from(user_id.to_string())];

    if let Some(client_id) = filter.client_id {
        sql.push_str(" AND client_id = ?");
        values.push(Value::from(client_id));
    }
    if let Some(task_id) = filter.task_id {
        sql.push_str(" AND task_id = ?");
        values.push(Value::from(task_id));
    }
    if let Some((start, end)) = filter.bounds {
        sql.push_str(" AND date >= ? AND date <= ?");
        values.push(Value::from(start.format("%Y-%m-%d").to_string()));
        values.push(Value::from(end.format("%Y-%m-%d").to_string()));
    }

    sql.push_str(" ORDER BY date ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Billable entries of one client in a period that have not been
/// invoiced yet. Used by `invoice create --from-time`.
pub fn load_unbilled(
    conn: &Connection,
    user_id: &str,
    client_id: i64,
    bounds: (NaiveDate, NaiveDate),
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE user_id = ?1 AND client_id = ?2
           AND billable = 1 AND billed = 0
           AND date >= ?3 AND date <= ?4
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            user_id,
            client_id,
            bounds.0.format("%Y-%m-%d").to_string(),
            bounds.1.format("%Y-%m-%d").to_string(),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn mark_billed(conn: &Connection, ids: &[i64]) -> AppResult<()> {
    let mut stmt = conn.prepare_cached("UPDATE time_entries SET billed = 1 WHERE id = ?1")?;
    for id in ids {
        stmt.execute([id])?;
    }
    Ok(())
}
