//! Dangling-reference scan.
//!
//! Client/task references are plain ids without foreign-key enforcement;
//! deleting a client leaves its tasks, time entries and invoices behind.
//! `db --check` reports these rows; nothing repairs them automatically.

use crate::errors::AppResult;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct DanglingRef {
    pub table: &'static str,
    pub id: i64,
    pub field: &'static str,
    pub missing_id: i64,
}

fn scan(
    conn: &Connection,
    user_id: &str,
    sql: &str,
    table: &'static str,
    field: &'static str,
    out: &mut Vec<DanglingRef>,
) -> AppResult<()> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([user_id], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
    })?;

    for r in rows {
        let (id, missing_id) = r?;
        out.push(DanglingRef {
            table,
            id,
            field,
            missing_id,
        });
    }
    Ok(())
}

pub fn scan_dangling_refs(conn: &Connection, user_id: &str) -> AppResult<Vec<DanglingRef>> {
    let mut out = Vec::new();

    scan(
        conn,
        user_id,
        "SELECT t.id, t.client_id FROM tasks t
         WHERE t.user_id = ?1 AND t.client_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.id = t.client_id)",
        "tasks",
        "client_id",
        &mut out,
    )?;

    scan(
        conn,
        user_id,
        "SELECT e.id, e.client_id FROM time_entries e
         WHERE e.user_id = ?1 AND e.client_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.id = e.client_id)",
        "time_entries",
        "client_id",
        &mut out,
    )?;

    scan(
        conn,
        user_id,
        "SELECT e.id, e.task_id FROM time_entries e
         WHERE e.user_id = ?1 AND e.task_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM tasks t WHERE t.id = e.task_id)",
        "time_entries",
        "task_id",
        &mut out,
    )?;

    scan(
        conn,
        user_id,
        "SELECT i.id, i.client_id FROM invoices i
         WHERE i.user_id = ?1
           AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.id = i.client_id)",
        "invoices",
        "client_id",
        &mut out,
    )?;

    Ok(out)
}
